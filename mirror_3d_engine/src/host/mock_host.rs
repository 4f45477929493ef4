/// In-memory host for tests and headless runs
///
/// One shared state behind `Rc<RefCell<..>>`: clones of a `MockHost`
/// handed to a `MirrorHost` all record into the same place, so the
/// caller can script the scene and inspect what the mirrors did.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use glam::{DVec2, DVec3};
use rustc_hash::{FxHashMap, FxHashSet};
use crate::culling::{FrustumPlane, QueryHit, TraceVolume};
use crate::error::Result;
use crate::log::LogSeverity;
use crate::mirror_bail;
use crate::quality::RenderTargetSize;
use super::{
    ActorId, CaptureView, Diagnostics, DisplayInfo, MirrorMaterialParams, RenderBackend,
    RenderTargetId, SceneQuery, ViewerState,
};

#[derive(Debug, Default)]
pub struct MockHostState {
    // Scripted inputs
    pub viewer: Option<ViewerState>,
    /// Surfaces no camera rendered recently
    pub unseen_surfaces: FxHashSet<ActorId>,
    pub scene_hits: Vec<QueryHit>,
    pub overlapping: FxHashMap<ActorId, Vec<ActorId>>,
    pub viewport: Option<DVec2>,
    pub device_resolution: Option<DVec2>,
    pub device_ipd_cm: Option<f64>,
    pub device_fov_degrees: Option<f64>,
    pub multi_view: bool,
    pub fail_render_targets: bool,
    pub fail_bindings: bool,

    // Recorded outputs
    pub traces: Vec<TraceVolume>,
    pub created_targets: Vec<(RenderTargetId, RenderTargetSize)>,
    pub released_targets: Vec<RenderTargetId>,
    pub bindings: Vec<(ActorId, Vec<RenderTargetId>, MirrorMaterialParams)>,
    pub param_updates: Vec<(ActorId, MirrorMaterialParams)>,
    pub captures: Vec<(ActorId, CaptureView)>,
    pub notifications: Vec<(LogSeverity, String)>,
    pub collections: usize,
    pub debug_planes: usize,
    pub debug_texts: Vec<String>,

    next_target: u64,
}

impl MockHostState {
    /// Render targets created and not yet released
    pub fn live_targets(&self) -> usize {
        self.created_targets.len().saturating_sub(self.released_targets.len())
    }

    pub fn captures_of(&self, mirror: ActorId) -> Vec<&CaptureView> {
        self.captures
            .iter()
            .filter(|(actor, _)| *actor == mirror)
            .map(|(_, view)| view)
            .collect()
    }

    pub fn clear_records(&mut self) {
        self.traces.clear();
        self.bindings.clear();
        self.param_updates.clear();
        self.captures.clear();
        self.notifications.clear();
        self.collections = 0;
        self.debug_planes = 0;
        self.debug_texts.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockHost {
    state: Rc<RefCell<MockHostState>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, MockHostState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, MockHostState> {
        self.state.borrow_mut()
    }

    pub fn set_viewer(&self, viewer: Option<ViewerState>) {
        self.state.borrow_mut().viewer = viewer;
    }
}

impl SceneQuery for MockHost {
    fn active_viewer(&self) -> Option<ViewerState> {
        self.state.borrow().viewer
    }

    fn was_recently_visible(&self, surface: ActorId) -> bool {
        !self.state.borrow().unseen_surfaces.contains(&surface)
    }

    fn query_bounding_spheres(&self, volume: &TraceVolume) -> Vec<QueryHit> {
        let mut state = self.state.borrow_mut();
        state.traces.push(*volume);
        state.scene_hits.clone()
    }

    fn actors_overlapping(&self, trigger: ActorId) -> Vec<ActorId> {
        self.state.borrow().overlapping.get(&trigger).cloned().unwrap_or_default()
    }
}

impl DisplayInfo for MockHost {
    fn viewport_resolution(&self) -> Option<DVec2> {
        self.state.borrow().viewport
    }

    fn device_resolution(&self) -> Option<DVec2> {
        self.state.borrow().device_resolution
    }

    fn device_ipd_cm(&self) -> Option<f64> {
        self.state.borrow().device_ipd_cm
    }

    fn device_fov_degrees(&self) -> Option<f64> {
        self.state.borrow().device_fov_degrees
    }

    fn is_multi_view(&self) -> bool {
        self.state.borrow().multi_view
    }
}

impl RenderBackend for MockHost {
    fn create_render_target(&mut self, size: RenderTargetSize) -> Result<RenderTargetId> {
        let mut state = self.state.borrow_mut();
        if state.fail_render_targets {
            mirror_bail!("mirror3d::MockHost", BackendError,
                "render target {}x{} refused", size.width, size.height);
        }
        state.next_target += 1;
        let id = RenderTargetId(state.next_target);
        state.created_targets.push((id, size));
        Ok(id)
    }

    fn release_render_target(&mut self, target: RenderTargetId) {
        self.state.borrow_mut().released_targets.push(target);
    }

    fn bind_mirror_material(
        &mut self,
        mirror: ActorId,
        targets: &[RenderTargetId],
        params: &MirrorMaterialParams,
    ) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_bindings {
            mirror_bail!("mirror3d::MockHost", BackendError,
                "material binding for {:?} refused", mirror);
        }
        state.bindings.push((mirror, targets.to_vec(), *params));
        Ok(())
    }

    fn update_material_params(&mut self, mirror: ActorId, params: &MirrorMaterialParams) {
        self.state.borrow_mut().param_updates.push((mirror, *params));
    }

    fn capture_scene(&mut self, mirror: ActorId, view: &CaptureView) -> Result<()> {
        self.state.borrow_mut().captures.push((mirror, view.clone()));
        Ok(())
    }
}

impl Diagnostics for MockHost {
    fn notify(&mut self, severity: LogSeverity, message: &str) {
        self.state.borrow_mut().notifications.push((severity, message.to_string()));
    }

    fn request_resource_collection(&mut self) {
        self.state.borrow_mut().collections += 1;
    }

    fn draw_debug_plane(&mut self, _plane: &FrustumPlane, _center: DVec3, _size: f64) {
        self.state.borrow_mut().debug_planes += 1;
    }

    fn draw_debug_text(&mut self, _location: DVec3, text: &str) {
        self.state.borrow_mut().debug_texts.push(text.to_string());
    }
}
