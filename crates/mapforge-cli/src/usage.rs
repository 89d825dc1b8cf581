//! Usage text printed for malformed invocations.
//!
//! One option table per stage, written to standard output (it is the
//! document the operator asked for, not a log line).

use std::fmt::Write;

fn row(out: &mut String, flag: &str, help: &str) {
    let _ = writeln!(out, "    {flag:<20} : {help}");
}

/// Renders the full usage text.
pub fn usage() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "usage: mapforge [--config <path>] [--log-level <level>] \
         [-gbsp [flags]] [-gvis [flags]] [-glight [flags]] <mapname> [destname]"
    );

    let _ = writeln!(out, "\n--- bsp options ---");
    row(&mut out, "mapname", "The .map file to process.");
    row(&mut out, "[destname]", "The .bsp output file path (optional).");
    row(&mut out, "-verbose", "Output detailed compilation progress information.");
    row(&mut out, "-entverbose", "Output detailed entity information.");
    row(&mut out, "-onlyents", "Do an entity update from .map to .bsp.");

    let _ = writeln!(out, "\n--- vis options ---");
    row(&mut out, "-verbose", "Output detailed compilation progress information.");
    row(
        &mut out,
        "-full",
        "Perform full visibility calculations. Use only for final compiles.",
    );
    row(&mut out, "-sortportals", "Sort the portals by might-see counts.");

    let _ = writeln!(out, "\n--- light options ---");
    row(&mut out, "-verbose", "Output detailed compilation progress information.");
    row(
        &mut out,
        "-minlight r g b",
        "Illuminate all surfaces with the given light color.",
    );
    row(
        &mut out,
        "-lightscale #",
        "Light intensity multiplier for the entire level.",
    );
    row(
        &mut out,
        "-reflectscale #",
        "Face reflectivity multiplier; higher is brighter and more colorful.",
    );
    row(&mut out, "-extra", "Use more samples for finer lighting effects.");
    row(&mut out, "-radiosity", "Perform radiosity lighting of the level.");
    row(&mut out, "-bounce #", "Number of radiosity bounces.");
    row(
        &mut out,
        "-patchsize #",
        "Radiosity patch grid size; smaller is higher quality.",
    );
    row(&mut out, "-fastpatch", "Fast patching for fast compiles.");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_names_every_flag() {
        let text = usage();
        for flag in [
            "-gbsp",
            "-gvis",
            "-glight",
            "-verbose",
            "-entverbose",
            "-onlyents",
            "-full",
            "-sortportals",
            "-minlight",
            "-lightscale",
            "-reflectscale",
            "-extra",
            "-radiosity",
            "-bounce",
            "-patchsize",
            "-fastpatch",
            "mapname",
            "destname",
        ] {
            assert!(text.contains(flag), "usage text is missing {flag}");
        }
    }
}
