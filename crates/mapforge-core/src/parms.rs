//! Per-stage compiler parameter records.
//!
//! One record per pipeline stage, holding the tunables the external compiler
//! accepts for that stage. All records deserialize with [`serde`] so a tool
//! configuration file can pre-seed any field; command-line flags are applied
//! on top of whatever the seed was.

use serde::Deserialize;

use crate::vector::Vec3;

/// Parameters for the BSP geometry stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BspParms {
    /// Emit detailed compilation progress.
    pub verbose: bool,
    /// Emit detailed per-entity information.
    pub entity_verbose: bool,
    /// Update entity data in an existing BSP instead of a full compile.
    pub only_entities: bool,
}

/// Parameters for the visibility stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VisParms {
    /// Emit detailed compilation progress.
    pub verbose: bool,
    /// Perform full visibility calculations.
    pub full_vis: bool,
    /// Sort portals by their might-see counts.
    pub sort_portals: bool,
}

/// Parameters for the lighting stage.
///
/// The compiled-in defaults: neutral scales, ten radiosity bounces,
/// 128-unit patches.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightParms {
    /// Emit detailed compilation progress.
    pub verbose: bool,
    /// Use extra samples for finer lighting.
    pub extra_samples: bool,
    /// Perform radiosity lighting.
    pub radiosity: bool,
    /// Use fast patching.
    pub fast_patch: bool,
    /// Minimum light color applied to every surface.
    pub min_light: Vec3,
    /// Light intensity multiplier for the whole level.
    pub light_scale: f32,
    /// Face reflectivity multiplier.
    pub reflective_scale: f32,
    /// Radiosity patch grid size.
    pub patch_size: f32,
    /// Number of radiosity bounces.
    pub bounce: i32,
}

impl Default for LightParms {
    fn default() -> Self {
        Self {
            verbose: false,
            extra_samples: false,
            radiosity: false,
            fast_patch: false,
            min_light: Vec3::default(),
            light_scale: 1.0,
            reflective_scale: 1.0,
            patch_size: 128.0,
            bounce: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn bsp_defaults_are_all_off() {
        let parms = BspParms::default();
        assert!(!parms.verbose);
        assert!(!parms.entity_verbose);
        assert!(!parms.only_entities);
    }

    #[test]
    fn light_defaults_match_compiled_in_values() {
        let parms = LightParms::default();
        assert_approx_eq!(f32, parms.light_scale, 1.0);
        assert_approx_eq!(f32, parms.reflective_scale, 1.0);
        assert_approx_eq!(f32, parms.patch_size, 128.0);
        assert_eq!(parms.bounce, 10);
        assert_eq!(parms.min_light, Vec3::default());
        assert!(!parms.radiosity);
    }
}
