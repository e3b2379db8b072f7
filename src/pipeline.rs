use crate::types::{SideChannel, StageError, StageRequest};

/// One step in a composed processing chain.
///
/// Stages implement a descend handler that transforms the request content,
/// and may implement a pitch handler that runs during the return phase,
/// before any content is read. The pitch handler sees which stages precede
/// and follow it in the composed chain and may write coordination state into
/// the request's side-channel bag.
pub trait Stage: Send + Sync {
    /// Stable identifier of this stage within a composed chain.
    fn id(&self) -> &str;

    /// Return-phase handler. Default: no-op.
    fn pitch(&self, _remaining: &[String], _preceding: &[String], _data: &mut SideChannel) {}

    /// Descend-phase handler: transform `req.content` (and optionally
    /// `req.source_map`) in place.
    ///
    /// # Errors
    ///
    /// Returns [`StageError`] when the transformation fails; the pipeline
    /// stops and the error fails this file's build only.
    fn descend(&self, req: &mut StageRequest) -> Result<(), StageError>;
}

/// A composed chain of stages for one request.
///
/// The chain is held in request order: the textually first stage is closest
/// to the request's final output, the last is closest to the raw resource.
/// `run` walks the pitch phase front-to-back, then the descend phase
/// back-to-front, so raw content enters the last stage first. Every pitch
/// completes before any descend begins; a skip decision made during the
/// return phase is therefore always visible to every descend handler.
pub struct Pipeline<'a> {
    stages: Vec<&'a dyn Stage>,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(stages: Vec<&'a dyn Stage>) -> Self {
        Self { stages }
    }

    /// Run both phases over the request.
    ///
    /// Records the composed chain on the request and guarantees the request
    /// has a side-channel bag for the duration of the run. The bag is scoped
    /// to this request; concurrent requests never observe each other's.
    ///
    /// # Errors
    ///
    /// Propagates the first [`StageError`] raised by a descend handler.
    pub fn run(&self, req: &mut StageRequest) -> Result<(), StageError> {
        let ids: Vec<String> = self.stages.iter().map(|s| s.id().to_owned()).collect();
        req.chain = ids.clone();
        if req.data.is_none() {
            req.data = Some(SideChannel::new());
        }

        for (i, stage) in self.stages.iter().enumerate() {
            let (preceding, rest) = ids.split_at(i);
            let remaining = &rest[1..];
            if let Some(data) = req.data.as_mut() {
                stage.pitch(remaining, preceding, data);
            }
        }

        for stage in self.stages.iter().rev() {
            stage.descend(req)?;
        }
        Ok(())
    }
}
