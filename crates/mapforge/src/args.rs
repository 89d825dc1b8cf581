//! The stage-scoped command-line grammar.
//!
//! A single pass over the token list with an explicit scope. The stage
//! selector tokens (`-gbsp`, `-gvis`, `-glight`) enable their stage and
//! open a scope; every flag that follows mutates the parameters of the open
//! scope until the next selector. Tokens without a leading `-` are
//! positionals: first the source map name, then the optional destination
//! name. A flag seen before any selector, or one the open scope does not
//! define, is discarded with a warning.
//!
//! Accepted tokens are echoed to the transcript once the whole list has
//! been interpreted.

use std::str::FromStr;

use log::{info, warn};

use mapforge_core::vector::Vec3;

use crate::{config::CompilerParms, error::ArgsError};

/// Which stage's parameters subsequent flags mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    None,
    Bsp,
    Vis,
    Light,
}

/// Interprets command-line `tokens` on top of `defaults`.
///
/// `defaults` carries the parameter seeds from the tool configuration;
/// its stage toggles and names must be unset. Returns the completed
/// aggregate, or the first grammar error.
///
/// # Errors
///
/// - [`ArgsError::Usage`] for an empty token list, a missing map name, or
///   a third positional.
/// - [`ArgsError::MissingValue`] when a value-consuming flag runs out of
///   tokens.
/// - [`ArgsError::BadValue`] when a consumed token fails numeric parsing.
pub fn parse<S: AsRef<str>>(
    tokens: &[S],
    defaults: CompilerParms,
) -> Result<CompilerParms, ArgsError> {
    if tokens.is_empty() {
        return Err(ArgsError::Usage);
    }
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

    let mut parms = defaults;
    let mut scope = Scope::None;
    let mut has_map = false;
    let mut has_dest = false;
    let mut accepted: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        i += 1;

        // Stage selectors switch scope wherever they appear.
        match token {
            "-gbsp" => {
                parms.bsp_enabled = true;
                scope = Scope::Bsp;
                accepted.push(token);
                continue;
            }
            "-gvis" => {
                parms.vis_enabled = true;
                scope = Scope::Vis;
                accepted.push(token);
                continue;
            }
            "-glight" => {
                parms.light_enabled = true;
                scope = Scope::Light;
                accepted.push(token);
                continue;
            }
            _ => {}
        }

        // Positionals: source map name, then destination name.
        if !token.starts_with('-') {
            if !has_map {
                parms.map_name = token.to_string();
                has_map = true;
            } else if !has_dest {
                parms.bsp_name = Some(token.to_string());
                has_dest = true;
            } else {
                return Err(ArgsError::Usage);
            }
            accepted.push(token);
            continue;
        }

        let handled = match scope {
            Scope::None => false,
            Scope::Bsp => match token {
                "-verbose" => {
                    parms.bsp.verbose = true;
                    accepted.push(token);
                    true
                }
                "-entverbose" => {
                    parms.bsp.entity_verbose = true;
                    accepted.push(token);
                    true
                }
                "-onlyents" => {
                    parms.bsp.only_entities = true;
                    accepted.push(token);
                    true
                }
                _ => false,
            },
            Scope::Vis => match token {
                "-verbose" => {
                    parms.vis.verbose = true;
                    accepted.push(token);
                    true
                }
                "-full" => {
                    parms.vis.full_vis = true;
                    accepted.push(token);
                    true
                }
                "-sortportals" => {
                    parms.vis.sort_portals = true;
                    accepted.push(token);
                    true
                }
                _ => false,
            },
            Scope::Light => match token {
                "-verbose" => {
                    parms.light.verbose = true;
                    accepted.push(token);
                    true
                }
                "-extra" => {
                    parms.light.extra_samples = true;
                    accepted.push(token);
                    true
                }
                "-radiosity" => {
                    parms.light.radiosity = true;
                    accepted.push(token);
                    true
                }
                "-fastpatch" => {
                    parms.light.fast_patch = true;
                    accepted.push(token);
                    true
                }
                "-minlight" => {
                    accepted.push(token);
                    let r = take_number::<f32>(&tokens, &mut i, "-minlight", &mut accepted)?;
                    let g = take_number::<f32>(&tokens, &mut i, "-minlight", &mut accepted)?;
                    let b = take_number::<f32>(&tokens, &mut i, "-minlight", &mut accepted)?;
                    parms.light.min_light = Vec3::new(r, g, b);
                    true
                }
                "-lightscale" => {
                    accepted.push(token);
                    parms.light.light_scale =
                        take_number(&tokens, &mut i, "-lightscale", &mut accepted)?;
                    true
                }
                "-reflectscale" => {
                    accepted.push(token);
                    parms.light.reflective_scale =
                        take_number(&tokens, &mut i, "-reflectscale", &mut accepted)?;
                    true
                }
                "-patchsize" => {
                    accepted.push(token);
                    parms.light.patch_size =
                        take_number(&tokens, &mut i, "-patchsize", &mut accepted)?;
                    true
                }
                "-bounce" => {
                    accepted.push(token);
                    parms.light.bounce = take_number(&tokens, &mut i, "-bounce", &mut accepted)?;
                    true
                }
                _ => false,
            },
        };

        if !handled {
            warn!(token; "Discarding flag outside its stage scope");
        }
    }

    if !has_map {
        return Err(ArgsError::Usage);
    }

    info!(arguments = accepted.join(" "); "Accepted compiler arguments");
    Ok(parms)
}

/// Consumes and parses the next token as a numeric argument of `flag`.
fn take_number<'t, T: FromStr>(
    tokens: &[&'t str],
    i: &mut usize,
    flag: &'static str,
    accepted: &mut Vec<&'t str>,
) -> Result<T, ArgsError> {
    let Some(&value) = tokens.get(*i) else {
        return Err(ArgsError::MissingValue { flag });
    };
    *i += 1;
    let parsed = value.parse().map_err(|_| ArgsError::BadValue {
        flag,
        value: value.to_string(),
    })?;
    accepted.push(value);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn parse_tokens(tokens: &[&str]) -> Result<CompilerParms, ArgsError> {
        parse(tokens, CompilerParms::default())
    }

    #[test]
    fn empty_token_list_is_a_usage_error() {
        assert!(matches!(parse_tokens(&[]), Err(ArgsError::Usage)));
    }

    #[test]
    fn bare_map_name_enables_nothing() {
        let parms = parse_tokens(&["level1"]).unwrap();
        assert_eq!(parms.map_name, "level1");
        assert_eq!(parms.bsp_name, None);
        assert!(!parms.bsp_enabled && !parms.vis_enabled && !parms.light_enabled);
        assert_eq!(parms.bsp, Default::default());
        assert_eq!(parms.vis, Default::default());
        assert_eq!(parms.light, Default::default());
    }

    #[test]
    fn second_positional_is_the_destination() {
        let parms = parse_tokens(&["-gbsp", "level1", "out/final"]).unwrap();
        assert_eq!(parms.map_name, "level1");
        assert_eq!(parms.bsp_name.as_deref(), Some("out/final"));
    }

    #[test]
    fn third_positional_is_a_usage_error() {
        assert!(matches!(
            parse_tokens(&["-gbsp", "a", "b", "c"]),
            Err(ArgsError::Usage)
        ));
    }

    #[test]
    fn missing_map_name_is_a_usage_error() {
        assert!(matches!(
            parse_tokens(&["-gbsp", "-verbose"]),
            Err(ArgsError::Usage)
        ));
    }

    #[test]
    fn selector_scopes_following_flags() {
        let parms = parse_tokens(&["-gbsp", "-verbose", "level1"]).unwrap();
        assert!(parms.bsp_enabled);
        assert!(parms.bsp.verbose);
        assert!(!parms.vis_enabled && !parms.light_enabled);
        assert!(!parms.vis.verbose && !parms.light.verbose);
        assert_eq!(parms.map_name, "level1");
    }

    #[test]
    fn scope_switches_at_each_selector() {
        let parms =
            parse_tokens(&["-gbsp", "-verbose", "-gvis", "-verbose", "-full", "m"]).unwrap();
        assert!(parms.bsp.verbose);
        assert!(parms.vis.verbose);
        assert!(parms.vis.full_vis);
        assert!(!parms.light.verbose);
    }

    #[test]
    fn flag_before_any_selector_is_discarded() {
        let parms = parse_tokens(&["-verbose", "level1"]).unwrap();
        assert!(!parms.bsp.verbose && !parms.vis.verbose && !parms.light.verbose);
        assert_eq!(parms.map_name, "level1");
    }

    #[test]
    fn flag_from_another_scope_is_discarded() {
        let parms = parse_tokens(&["-gvis", "-onlyents", "level1"]).unwrap();
        assert!(!parms.bsp.only_entities);
        assert!(parms.vis_enabled);
    }

    #[test]
    fn sortportals_sets_the_flag() {
        let parms = parse_tokens(&["-gvis", "-sortportals", "m"]).unwrap();
        assert!(parms.vis.sort_portals);
    }

    #[test]
    fn lighting_numeric_flags() {
        let parms = parse_tokens(&[
            "-glight",
            "-minlight",
            "10",
            "20",
            "30",
            "-lightscale",
            "1.5",
            "mymap",
        ])
        .unwrap();
        assert!(parms.light_enabled);
        assert_eq!(parms.light.min_light, Vec3::new(10.0, 20.0, 30.0));
        assert_approx_eq!(f32, parms.light.light_scale, 1.5);
        // Untouched lighting defaults stay intact.
        assert_approx_eq!(f32, parms.light.reflective_scale, 1.0);
        assert_approx_eq!(f32, parms.light.patch_size, 128.0);
        assert_eq!(parms.light.bounce, 10);
        assert_eq!(parms.map_name, "mymap");
    }

    #[test]
    fn bounce_without_value_is_missing() {
        match parse_tokens(&["-glight", "-bounce"]) {
            Err(ArgsError::MissingValue { flag }) => assert_eq!(flag, "-bounce"),
            other => panic!("expected MissingValue, got {other:?}"),
        }
    }

    #[test]
    fn minlight_with_two_components_is_missing() {
        match parse_tokens(&["-glight", "-minlight", "10", "20"]) {
            Err(ArgsError::MissingValue { flag }) => assert_eq!(flag, "-minlight"),
            other => panic!("expected MissingValue, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_number_is_a_bad_value() {
        match parse_tokens(&["-glight", "-bounce", "ten", "m"]) {
            Err(ArgsError::BadValue { flag, value }) => {
                assert_eq!(flag, "-bounce");
                assert_eq!(value, "ten");
            }
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn flag_token_is_not_a_valid_number() {
        assert!(matches!(
            parse_tokens(&["-glight", "-lightscale", "-fastpatch", "m"]),
            Err(ArgsError::BadValue { flag: "-lightscale", .. })
        ));
    }

    #[test]
    fn configuration_seeds_survive_unrelated_flags() {
        let mut defaults = CompilerParms::default();
        defaults.light.light_scale = 2.0;
        defaults.vis.full_vis = true;

        let parms = parse(&["-glight", "-radiosity", "m"], defaults).unwrap();
        assert_approx_eq!(f32, parms.light.light_scale, 2.0);
        assert!(parms.vis.full_vis);
        assert!(parms.light.radiosity);
    }

    #[test]
    fn all_three_stages_enable_together() {
        let parms = parse_tokens(&["-gbsp", "-gvis", "-glight", "level1", "level1_final"]).unwrap();
        assert!(parms.bsp_enabled && parms.vis_enabled && parms.light_enabled);
        assert_eq!(parms.bsp_name.as_deref(), Some("level1_final"));
    }
}
