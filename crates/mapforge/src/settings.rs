//! Rendered settings tables.
//!
//! Before each enabled stage the orchestrator logs a three-column table of
//! that stage's parameters next to the compiled-in defaults, so a transcript
//! always records what the stage actually ran with. Rendering is pure so
//! the tables are testable without capturing log output.

use std::fmt::Write;

use mapforge_core::parms::{BspParms, LightParms, VisParms};

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "CURRENT {title} SETTINGS:");
    let _ = writeln!(out, "{:<20}|{:>12} |{:>12}", "Name", "Setting", "Default");
    let _ = writeln!(out, "{:-<20}|{:-<13}|{:-<13}", "", "", "");
}

fn row(out: &mut String, name: &str, setting: impl ToString, default: impl ToString) {
    let _ = writeln!(
        out,
        "{:<20}|{:>12} |{:>12}",
        name,
        setting.to_string(),
        default.to_string()
    );
}

/// Renders the BSP stage table.
pub fn render_bsp(parms: &BspParms) -> String {
    let defaults = BspParms::default();
    let mut out = String::new();
    header(&mut out, "bsp");
    row(&mut out, "verbose", on_off(parms.verbose), on_off(defaults.verbose));
    row(
        &mut out,
        "entverbose",
        on_off(parms.entity_verbose),
        on_off(defaults.entity_verbose),
    );
    row(
        &mut out,
        "onlyents",
        on_off(parms.only_entities),
        on_off(defaults.only_entities),
    );
    out
}

/// Renders the visibility stage table.
pub fn render_vis(parms: &VisParms) -> String {
    let defaults = VisParms::default();
    let mut out = String::new();
    header(&mut out, "vis");
    row(&mut out, "verbose", on_off(parms.verbose), on_off(defaults.verbose));
    row(&mut out, "full", on_off(parms.full_vis), on_off(defaults.full_vis));
    row(
        &mut out,
        "sortportals",
        on_off(parms.sort_portals),
        on_off(defaults.sort_portals),
    );
    out
}

/// Renders the lighting stage table.
pub fn render_light(parms: &LightParms) -> String {
    let defaults = LightParms::default();
    let mut out = String::new();
    header(&mut out, "light");
    row(&mut out, "verbose", on_off(parms.verbose), on_off(defaults.verbose));
    row(&mut out, "minlight", parms.min_light, defaults.min_light);
    row(&mut out, "lightscale", parms.light_scale, defaults.light_scale);
    row(
        &mut out,
        "reflectscale",
        parms.reflective_scale,
        defaults.reflective_scale,
    );
    row(
        &mut out,
        "extra",
        on_off(parms.extra_samples),
        on_off(defaults.extra_samples),
    );
    row(&mut out, "radiosity", on_off(parms.radiosity), on_off(defaults.radiosity));
    row(&mut out, "bounce", parms.bounce, defaults.bounce);
    row(&mut out, "patchsize", parms.patch_size, defaults.patch_size);
    row(&mut out, "fastpatch", on_off(parms.fast_patch), on_off(defaults.fast_patch));
    out
}
