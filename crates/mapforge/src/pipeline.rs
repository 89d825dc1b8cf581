//! The stage orchestrator.
//!
//! Runs the enabled stages in fixed order: BSP geometry, then visibility,
//! then lighting. Visibility and lighting both read the artifact the BSP
//! stage writes, so the order never changes. A disabled stage is skipped
//! outright, with no artifact check and no warning. The first failing
//! enabled stage ends the run; nothing is retried and already-written
//! files are left as they are.

use log::info;

use crate::{
    config::CompilerParms, error::PipelineError, gateway::CompilerSession, settings,
};

/// Runs the enabled stages against a loaded compiler session.
///
/// # Errors
///
/// The [`PipelineError`] variant for the first entry point that reported
/// failure. The compiler's in-memory geometry is freed before a BSP-stage
/// failure propagates.
pub fn run(parms: &CompilerParms, session: &mut dyn CompilerSession) -> Result<(), PipelineError> {
    let source = parms.source_path();
    let dest = parms.dest_path();

    if parms.bsp_enabled {
        info!(source = source.as_str(), dest = dest.as_str(); "BEGIN bsp stage");
        info!("{}", settings::render_bsp(&parms.bsp));
        let result = bsp_stage(parms, session, &source, &dest);
        // The compiler holds compiled geometry in memory between create and
        // free; free unconditionally so a failed compile or save cannot
        // leak it into the later stages.
        session.free_bsp();
        result?;
        info!("END bsp stage");
    }

    if parms.vis_enabled {
        info!(dest = dest.as_str(); "BEGIN vis stage");
        info!("{}", settings::render_vis(&parms.vis));
        session
            .vis_bsp(&dest, &parms.vis)
            .map_err(|_| PipelineError::Vis { path: dest.clone() })?;
        info!("END vis stage");
    }

    if parms.light_enabled {
        info!(dest = dest.as_str(); "BEGIN light stage");
        info!("{}", settings::render_light(&parms.light));
        session
            .light_bsp(&dest, &parms.light)
            .map_err(|_| PipelineError::Light { path: dest.clone() })?;
        info!("END light stage");
    }

    Ok(())
}

fn bsp_stage(
    parms: &CompilerParms,
    session: &mut dyn CompilerSession,
    source: &str,
    dest: &str,
) -> Result<(), PipelineError> {
    if parms.bsp.only_entities {
        session
            .update_entities(source, dest)
            .map_err(|_| PipelineError::EntityUpdate {
                path: dest.to_string(),
            })
    } else {
        session
            .create_bsp(source, &parms.bsp)
            .map_err(|_| PipelineError::Compile {
                path: source.to_string(),
            })?;
        session.save_bsp(dest).map_err(|_| PipelineError::Save {
            path: dest.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use mapforge_core::parms::{BspParms, LightParms, VisParms};

    use crate::error::StageFailure;

    use super::*;

    /// Session double that records entry-point calls and can be told to
    /// fail a named entry point.
    #[derive(Default)]
    struct RecordingSession {
        calls: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl RecordingSession {
        fn failing(entry_point: &'static str) -> Self {
            Self {
                fail_on: Some(entry_point),
                ..Self::default()
            }
        }

        fn record(&mut self, name: &'static str, args: &str) -> Result<(), StageFailure> {
            self.calls.push(format!("{name}({args})"));
            if self.fail_on == Some(name) {
                Err(StageFailure)
            } else {
                Ok(())
            }
        }
    }

    impl CompilerSession for RecordingSession {
        fn create_bsp(&mut self, map_path: &str, _parms: &BspParms) -> Result<(), StageFailure> {
            self.record("create_bsp", map_path)
        }

        fn update_entities(&mut self, map_path: &str, bsp_path: &str) -> Result<(), StageFailure> {
            self.record("update_entities", &format!("{map_path}, {bsp_path}"))
        }

        fn save_bsp(&mut self, bsp_path: &str) -> Result<(), StageFailure> {
            self.record("save_bsp", bsp_path)
        }

        fn free_bsp(&mut self) {
            self.calls.push("free_bsp()".to_string());
        }

        fn vis_bsp(&mut self, bsp_path: &str, _parms: &VisParms) -> Result<(), StageFailure> {
            self.record("vis_bsp", bsp_path)
        }

        fn light_bsp(&mut self, bsp_path: &str, _parms: &LightParms) -> Result<(), StageFailure> {
            self.record("light_bsp", bsp_path)
        }
    }

    fn all_stages() -> CompilerParms {
        CompilerParms {
            map_name: "level1".into(),
            bsp_enabled: true,
            vis_enabled: true,
            light_enabled: true,
            ..CompilerParms::default()
        }
    }

    #[test]
    fn full_run_sequences_stages_in_order() {
        let parms = all_stages();
        let mut session = RecordingSession::default();

        run(&parms, &mut session).unwrap();

        assert_eq!(
            session.calls,
            vec![
                "create_bsp(level1.map)",
                "save_bsp(level1.bsp)",
                "free_bsp()",
                "vis_bsp(level1.bsp)",
                "light_bsp(level1.bsp)",
            ]
        );
    }

    #[test]
    fn compile_failure_halts_and_still_frees() {
        let parms = all_stages();
        let mut session = RecordingSession::failing("create_bsp");

        let err = run(&parms, &mut session).unwrap_err();

        assert!(matches!(err, PipelineError::Compile { .. }));
        assert_eq!(session.calls, vec!["create_bsp(level1.map)", "free_bsp()"]);
    }

    #[test]
    fn save_failure_halts_and_still_frees() {
        let parms = all_stages();
        let mut session = RecordingSession::failing("save_bsp");

        let err = run(&parms, &mut session).unwrap_err();

        assert!(matches!(err, PipelineError::Save { .. }));
        assert_eq!(
            session.calls,
            vec!["create_bsp(level1.map)", "save_bsp(level1.bsp)", "free_bsp()"]
        );
    }

    #[test]
    fn entity_update_skips_compile_and_save() {
        let mut parms = all_stages();
        parms.vis_enabled = false;
        parms.light_enabled = false;
        parms.bsp.only_entities = true;

        let mut session = RecordingSession::default();
        run(&parms, &mut session).unwrap();

        assert_eq!(
            session.calls,
            vec!["update_entities(level1.map, level1.bsp)", "free_bsp()"]
        );
    }

    #[test]
    fn entity_update_failure_is_its_own_class() {
        let mut parms = all_stages();
        parms.bsp.only_entities = true;

        let mut session = RecordingSession::failing("update_entities");
        let err = run(&parms, &mut session).unwrap_err();

        assert!(matches!(err, PipelineError::EntityUpdate { .. }));
        assert_eq!(
            session.calls,
            vec!["update_entities(level1.map, level1.bsp)", "free_bsp()"]
        );
    }

    #[test]
    fn vis_runs_alone_on_a_prebuilt_artifact() {
        let parms = CompilerParms {
            map_name: "level1".into(),
            vis_enabled: true,
            ..CompilerParms::default()
        };

        let mut session = RecordingSession::default();
        run(&parms, &mut session).unwrap();

        // No geometry work, no free; straight to the existing artifact.
        assert_eq!(session.calls, vec!["vis_bsp(level1.bsp)"]);
    }

    #[test]
    fn vis_failure_skips_lighting() {
        let parms = all_stages();
        let mut session = RecordingSession::failing("vis_bsp");

        let err = run(&parms, &mut session).unwrap_err();

        assert!(matches!(err, PipelineError::Vis { .. }));
        assert!(err.is_warning());
        assert!(!session.calls.iter().any(|c| c.starts_with("light_bsp")));
    }

    #[test]
    fn explicit_destination_feeds_later_stages() {
        let mut parms = all_stages();
        parms.bsp_name = Some("out/final".into());

        let mut session = RecordingSession::default();
        run(&parms, &mut session).unwrap();

        assert!(session.calls.contains(&"save_bsp(out/final.bsp)".to_string()));
        assert!(session.calls.contains(&"vis_bsp(out/final.bsp)".to_string()));
    }
}
