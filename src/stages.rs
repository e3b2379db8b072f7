use tracing::debug;

use crate::pipeline::Stage;
use crate::types::{GenerateError, SideChannel, StageError, StageRequest, SKIP_KEY};

/// Identifier of the grafted auto-import stage.
pub const SCRIPT_STAGE_ID: &str = "rulegraft/script-loader";

/// Identifier of the style-exposing stage.
pub const STYLE_STAGE_ID: &str = "rulegraft/style-loader";

/// Identity suffix of the upstream framework's pitching stage. When that
/// stage is composed into a request's chain, the wrapping pipeline has
/// already augmented the content and the script stage must pass through.
pub const PITCHER_SUFFIX: &str = "vue-loader/dist/pitcher";

/// Output of the import-generation capability: the (possibly rewritten)
/// source plus the import statements to append after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImports {
    pub source: String,
    pub code: String,
}

/// The content-generation capability consumed by [`ScriptStage`]. The actual
/// parsing and code generation live outside this crate; tests substitute a
/// double.
pub trait ImportGenerator: Send + Sync {
    /// Produce import statements for the components referenced in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] on malformed input.
    fn generate(&self, source: &str) -> Result<GeneratedImports, GenerateError>;
}

/// The injected auto-import stage (S1).
///
/// Its pitch handler implements the skip side of the protocol: when the known
/// upstream pitcher is present anywhere in the composed chain, it flags
/// `skip` in the side-channel bag and the descend handler becomes a pure
/// pass-through. Otherwise descend appends the generated imports after the
/// source.
pub struct ScriptStage<G> {
    generator: G,
}

impl<G: ImportGenerator> ScriptStage<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

impl<G: ImportGenerator> Stage for ScriptStage<G> {
    fn id(&self) -> &str {
        SCRIPT_STAGE_ID
    }

    fn pitch(&self, remaining: &[String], preceding: &[String], data: &mut SideChannel) {
        let pitcher_present = preceding
            .iter()
            .chain(remaining)
            .any(|id| id.ends_with(PITCHER_SUFFIX));
        if pitcher_present {
            data.set(SKIP_KEY, true);
        }
    }

    fn descend(&self, req: &mut StageRequest) -> Result<(), StageError> {
        if req.skip_requested() {
            debug!(resource = %req.resource_path, "skip flagged, passing content through");
            return Ok(());
        }

        let generated =
            self.generator
                .generate(&req.content)
                .map_err(|e| StageError::Generate {
                    resource: req.resource_path.clone(),
                    message: e.to_string(),
                })?;
        req.content = format!("{}{}", generated.source, generated.code);
        Ok(())
    }
}

/// Pass-through stage that surfaces framework style assets to the host
/// instead of running them through the normal CSS chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct StyleStage;

impl Stage for StyleStage {
    fn id(&self) -> &str {
        STYLE_STAGE_ID
    }

    fn descend(&self, req: &mut StageRequest) -> Result<(), StageError> {
        debug!(
            resource = %req.resource_path,
            query = %req.resource_query,
            "exposing style asset"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    struct FixedImports;

    impl ImportGenerator for FixedImports {
        fn generate(&self, source: &str) -> Result<GeneratedImports, GenerateError> {
            Ok(GeneratedImports {
                source: source.to_owned(),
                code: "\nimport { VBtn } from 'vuetify/components'\n".to_owned(),
            })
        }
    }

    struct RejectAll;

    impl ImportGenerator for RejectAll {
        fn generate(&self, _source: &str) -> Result<GeneratedImports, GenerateError> {
            Err(GenerateError::new("unexpected token at 1:1"))
        }
    }

    /// Stand-in for the upstream framework's pitching stage.
    struct Pitcher;

    impl Stage for Pitcher {
        fn id(&self) -> &str {
            "vue-loader/dist/pitcher"
        }

        fn descend(&self, _req: &mut StageRequest) -> Result<(), StageError> {
            Ok(())
        }
    }

    #[test]
    fn descend_appends_generated_imports() {
        let stage = ScriptStage::new(FixedImports);
        let mut req = StageRequest::new("/src/App.vue", "<template><v-btn/></template>");
        stage.descend(&mut req).unwrap();
        assert!(req.content.starts_with("<template><v-btn/></template>"));
        assert!(req.content.ends_with("import { VBtn } from 'vuetify/components'\n"));
    }

    #[test]
    fn skip_flag_makes_descend_a_pure_passthrough() {
        let stage = ScriptStage::new(FixedImports);
        let mut req = StageRequest::new("/src/App.vue", "untouched content");
        if let Some(data) = req.data.as_mut() {
            data.set(SKIP_KEY, true);
        }
        stage.descend(&mut req).unwrap();
        assert_eq!(req.content, "untouched content");
    }

    #[test]
    fn absent_bag_transforms_normally() {
        let stage = ScriptStage::new(FixedImports);
        let mut req = StageRequest::new("/src/App.vue", "body");
        req.data = None;
        stage.descend(&mut req).unwrap();
        assert_ne!(req.content, "body");
    }

    #[test]
    fn pitch_flags_skip_when_pitcher_composed_after() {
        let stage = ScriptStage::new(FixedImports);
        let mut data = SideChannel::new();
        stage.pitch(
            &["vue-loader/dist/pitcher".to_owned(), "vue-loader".to_owned()],
            &[],
            &mut data,
        );
        assert!(data.flag(SKIP_KEY));
    }

    #[test]
    fn pitch_flags_skip_when_pitcher_composed_before() {
        let stage = ScriptStage::new(FixedImports);
        let mut data = SideChannel::new();
        stage.pitch(&[], &["wrapper/vue-loader/dist/pitcher".to_owned()], &mut data);
        assert!(data.flag(SKIP_KEY));
    }

    #[test]
    fn pitch_leaves_flag_unset_without_pitcher() {
        let stage = ScriptStage::new(FixedImports);
        let mut data = SideChannel::new();
        stage.pitch(&["vue-loader".to_owned()], &[], &mut data);
        assert!(!data.flag(SKIP_KEY));
    }

    #[test]
    fn composed_pipeline_skips_when_pitcher_present() {
        let script = ScriptStage::new(FixedImports);
        let pitcher = Pitcher;
        let mut req = StageRequest::new("/src/App.vue", "already augmented");
        Pipeline::new(vec![&script, &pitcher]).run(&mut req).unwrap();
        assert_eq!(req.content, "already augmented");
    }

    #[test]
    fn composed_pipeline_transforms_without_pitcher() {
        let script = ScriptStage::new(FixedImports);
        let mut req = StageRequest::new("/src/App.vue", "raw");
        Pipeline::new(vec![&script]).run(&mut req).unwrap();
        assert!(req.content.starts_with("raw"));
        assert!(req.content.contains("import { VBtn }"));
    }

    #[test]
    fn generator_failure_surfaces_as_stage_error() {
        let stage = ScriptStage::new(RejectAll);
        let mut req = StageRequest::new("/src/Broken.vue", "<template");
        let err = stage.descend(&mut req).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/src/Broken.vue"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn style_stage_passes_content_through() {
        let stage = StyleStage;
        let mut req = StageRequest::new("/node_modules/vuetify/styles.css", ".v-btn{}");
        stage.descend(&mut req).unwrap();
        assert_eq!(req.content, ".v-btn{}");
    }
}
