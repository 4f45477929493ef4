/// Bundle of host collaborators a `MirrorSystem` works against.

use super::{DisplayInfo, Diagnostics, RenderBackend, SceneQuery, Scheduler};

pub struct MirrorHost {
    pub scene: Box<dyn SceneQuery>,
    pub display: Box<dyn DisplayInfo>,
    pub backend: Box<dyn RenderBackend>,
    pub diagnostics: Box<dyn Diagnostics>,
    pub scheduler: Box<dyn Scheduler>,
}

impl MirrorHost {
    pub fn new(
        scene: impl SceneQuery + 'static,
        display: impl DisplayInfo + 'static,
        backend: impl RenderBackend + 'static,
        diagnostics: impl Diagnostics + 'static,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        Self {
            scene: Box::new(scene),
            display: Box::new(display),
            backend: Box::new(backend),
            diagnostics: Box::new(diagnostics),
            scheduler: Box::new(scheduler),
        }
    }
}
