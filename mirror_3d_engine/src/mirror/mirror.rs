/// A single mirror: configuration, surface, quality state, trigger
/// occupancy and its render target binding.
///
/// Mono and stereo mirrors share this type; the eye layout only changes
/// how resolution, FOV and IPD are resolved and how many captures run.

use glam::{DVec2, DVec3};
use crate::capture::{CaptureGate, GateInput, SkipReasons, TriggerOccupancy};
use crate::config::{DebugDisplay, MirrorConfig};
use crate::culling::{FrustumParams, MirrorCuller, MirrorFrustum, ShowList, TraceVolume};
use crate::error::Result;
use crate::host::{
    ActorId, CaptureView, ClipPlane, MirrorHost, MirrorMaterialParams, RenderTargetId, ViewerState,
};
use crate::log::LogSeverity;
use crate::math::Pose;
use crate::quality::{render_target_size, update_quality, CaptureQualityState, RenderTargetSize};
use crate::reflection::{reflect, EyeLayout, MirrorSurface, DEFAULT_IPD_CM};
use crate::{mirror_bail, mirror_debug, mirror_info, mirror_trace, mirror_warn};

const SOURCE: &str = "mirror3d::Mirror";

/// Horizontal FOV used when neither the device nor a viewer reports one
pub const DEFAULT_FOV_DEGREES: f64 = 90.0;

/// Size of the debug planes drawn for `DebugDisplay::CULLING_PLANES`
const DEBUG_PLANE_SIZE: f64 = 2000.0;

/// Render targets and the display values they were sized from.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBinding {
    /// One target per eye
    pub targets: Vec<RenderTargetId>,
    pub size: RenderTargetSize,
    pub resolution: DVec2,
    pub fov_degrees: f64,
    pub ipd_half: f64,
    pub multi_view: bool,
}

/// What a mirror did on a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Skipped(SkipReasons),
    Captured {
        eyes: usize,
        /// Show-list length when culling is enabled
        shown: Option<usize>,
    },
}

#[derive(Debug)]
pub struct Mirror {
    actor: ActorId,
    surface: MirrorSurface,
    config: MirrorConfig,
    quality: CaptureQualityState,
    occupancy: TriggerOccupancy,
    binding: Option<RenderBinding>,
    last_skip: SkipReasons,
    last_frustum: Option<MirrorFrustum>,
    last_show_list: Option<ShowList>,
}

impl Mirror {
    /// Validate and build a mirror. Nothing is created on the host until
    /// `initialize` runs.
    ///
    /// The surface's max viewing distance is always taken from
    /// `config.capture_max_distance`.
    pub fn new(actor: ActorId, surface: MirrorSurface, config: MirrorConfig) -> Result<Self> {
        config.validate()?;
        if surface.max_view_distance != config.capture_max_distance {
            mirror_debug!(SOURCE, "Mirror {:?}: max view distance {} replaced by configured {}",
                actor, surface.max_view_distance, config.capture_max_distance);
        }
        let surface = MirrorSurface { max_view_distance: config.capture_max_distance, ..surface };
        surface.validate()?;
        Ok(Self {
            actor,
            surface,
            quality: CaptureQualityState::new(config.capture_quality),
            occupancy: TriggerOccupancy::new(&config.capture_triggers),
            config,
            binding: None,
            last_skip: SkipReasons::empty(),
            last_frustum: None,
            last_show_list: None,
        })
    }

    // ===== ACCESSORS =====

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn surface(&self) -> &MirrorSurface {
        &self.surface
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn eye_layout(&self) -> EyeLayout {
        self.config.eye_layout
    }

    pub fn quality(&self) -> CaptureQualityState {
        self.quality
    }

    pub fn binding(&self) -> Option<&RenderBinding> {
        self.binding.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.binding.is_some()
    }

    pub fn occupancy(&self) -> &TriggerOccupancy {
        &self.occupancy
    }

    /// Skip reasons of the most recent tick (empty after a capture).
    pub fn last_skip(&self) -> SkipReasons {
        self.last_skip
    }

    /// Frustum of the most recent culled capture.
    pub fn last_frustum(&self) -> Option<&MirrorFrustum> {
        self.last_frustum.as_ref()
    }

    /// Show list of the most recent culled capture.
    pub fn last_show_list(&self) -> Option<&ShowList> {
        self.last_show_list.as_ref()
    }

    /// Move the mirror. Takes effect on the next tick.
    pub fn set_pose(&mut self, pose: Pose) -> Result<()> {
        let surface = MirrorSurface { pose, ..self.surface };
        surface.validate()?;
        self.surface = surface;
        Ok(())
    }

    // ===== INITIALIZATION =====

    /// Resolve display values, (re)create one render target per eye and
    /// bind them to the mirror material.
    ///
    /// Runs after the deferred init delay and again on viewport resize
    /// or viewer change; every run replaces the previous binding.
    pub fn initialize(&mut self, host: &mut MirrorHost) -> Result<()> {
        let viewer = host.scene.active_viewer();
        if viewer.is_none() {
            host.diagnostics.notify(LogSeverity::Warn, "Active camera not valid during mirror init");
        }

        let layout = self.config.eye_layout;
        let resolution = match layout {
            EyeLayout::Mono => host.display.viewport_resolution(),
            EyeLayout::Stereo => host.display.device_resolution(),
        };
        let Some(resolution) = resolution.filter(|r| r.x > 0.0 && r.y > 0.0) else {
            mirror_bail!(SOURCE, InitializationFailed,
                "mirror {:?}: no {} resolution available",
                self.actor,
                match layout {
                    EyeLayout::Mono => "viewport",
                    EyeLayout::Stereo => "device",
                });
        };

        let fov_degrees = self.resolve_fov(host, viewer.as_ref());
        let ipd_half = self.resolve_ipd_half(host);
        let multi_view = layout == EyeLayout::Stereo && host.display.is_multi_view();

        let aspect = match layout {
            EyeLayout::Mono => viewer.and_then(|v| v.constrained_aspect_ratio),
            EyeLayout::Stereo => None,
        };
        let size = render_target_size(layout, resolution, self.quality.scale, aspect, multi_view);

        self.release(host);
        let targets = self.create_targets(host, size)?;
        let binding = RenderBinding {
            targets,
            size,
            resolution,
            fov_degrees,
            ipd_half,
            multi_view,
        };

        let camera = viewer.map(|v| v.pose).unwrap_or_default();
        self.bind_material(host, &camera, &binding)?;

        mirror_info!(SOURCE,
            "Mirror {:?} initialized: {} eye(s) at {}x{} (quality {:.1}, fov {}, ipd/2 {})",
            self.actor, binding.targets.len(), size.width, size.height,
            self.quality.scale, fov_degrees, ipd_half);
        self.binding = Some(binding);
        Ok(())
    }

    /// Release render targets and forget the binding. Captures skip until
    /// the next `initialize`.
    pub fn release(&mut self, host: &mut MirrorHost) {
        self.release_targets(host);
        self.binding = None;
    }

    fn resolve_fov(&self, host: &MirrorHost, viewer: Option<&ViewerState>) -> f64 {
        let viewer_fov = viewer.map(|v| v.fov_degrees);
        match self.config.eye_layout {
            EyeLayout::Mono => viewer_fov.unwrap_or(DEFAULT_FOV_DEGREES),
            EyeLayout::Stereo => host
                .display
                .device_fov_degrees()
                .map(f64::round)
                .or(viewer_fov)
                .unwrap_or(DEFAULT_FOV_DEGREES),
        }
    }

    /// Half the interpupillary distance: configured, else device, else
    /// the default. Mono mirrors have no eye offset.
    fn resolve_ipd_half(&self, host: &MirrorHost) -> f64 {
        if self.config.eye_layout == EyeLayout::Mono {
            return 0.0;
        }
        let ipd_cm = if self.config.custom_ipd_cm > 0.0 {
            self.config.custom_ipd_cm
        } else {
            host.display
                .device_ipd_cm()
                .filter(|ipd| *ipd > 0.0)
                .unwrap_or(DEFAULT_IPD_CM)
        };
        ipd_cm / 2.0
    }

    fn create_targets(&self, host: &mut MirrorHost, size: RenderTargetSize) -> Result<Vec<RenderTargetId>> {
        let mut targets = Vec::with_capacity(self.config.eye_layout.eye_count());
        for _ in 0..self.config.eye_layout.eye_count() {
            match host.backend.create_render_target(size) {
                Ok(target) => targets.push(target),
                Err(error) => {
                    for target in targets {
                        host.backend.release_render_target(target);
                    }
                    return Err(error);
                }
            }
        }
        Ok(targets)
    }

    /// Bind `binding`'s targets to the mirror material. On failure the
    /// targets are released, since no binding will own them.
    fn bind_material(&self, host: &mut MirrorHost, camera: &Pose, binding: &RenderBinding) -> Result<()> {
        let params = self.material_params(camera, binding);
        if let Err(error) = host.backend.bind_mirror_material(self.actor, &binding.targets, &params) {
            for target in &binding.targets {
                host.backend.release_render_target(*target);
            }
            return Err(error);
        }
        Ok(())
    }

    fn release_targets(&self, host: &mut MirrorHost) {
        if let Some(binding) = &self.binding {
            for target in &binding.targets {
                host.backend.release_render_target(*target);
            }
        }
    }

    fn material_params(&self, camera: &Pose, binding: &RenderBinding) -> MirrorMaterialParams {
        let mut flags = 0;
        if self.config.eye_layout == EyeLayout::Stereo {
            flags |= MirrorMaterialParams::FLAG_STEREO;
        }
        if binding.multi_view {
            flags |= MirrorMaterialParams::FLAG_MULTI_VIEW;
        }
        MirrorMaterialParams::new(camera, binding.resolution, binding.fov_degrees, flags)
    }

    // ===== DYNAMIC QUALITY =====

    /// Re-evaluate capture quality from the viewer distance.
    ///
    /// Returns whether the quality changed. A change rebuilds the render
    /// targets (when bound) and asks the host for a resource collection.
    pub fn check_dynamic_quality(&mut self, host: &mut MirrorHost) -> Result<bool> {
        let Some(range) = self.config.quality_range() else {
            return Ok(false);
        };
        let Some(viewer) = host.scene.active_viewer() else {
            return Ok(false);
        };

        let distance_squared = viewer.pose.position.distance_squared(self.surface.center());
        let (quality, changed) = update_quality(self.quality, distance_squared, &range);
        if !changed {
            return Ok(false);
        }

        mirror_debug!(SOURCE, "Mirror {:?} capture quality {:.1} -> {:.1}",
            self.actor, self.quality.scale, quality.scale);
        self.quality = quality;

        if let Some(binding) = self.binding.take() {
            for target in &binding.targets {
                host.backend.release_render_target(*target);
            }
            let size = render_target_size(
                self.config.eye_layout,
                binding.resolution,
                quality.scale,
                viewer.constrained_aspect_ratio.filter(|_| self.config.eye_layout == EyeLayout::Mono),
                binding.multi_view,
            );
            let targets = self.create_targets(host, size)?;
            let binding = RenderBinding { targets, size, ..binding };
            self.bind_material(host, &viewer.pose, &binding)?;
            self.binding = Some(binding);
        }

        if self.config.debug_display.contains(DebugDisplay::CAPTURE_QUALITY) {
            host.diagnostics.notify(
                LogSeverity::Info,
                &format!("Mirror {:?} capture quality {:.1}", self.actor, quality.scale),
            );
        }
        host.diagnostics.request_resource_collection();
        Ok(true)
    }

    // ===== TRIGGERS =====

    /// Track `viewer_actor` for trigger occupancy and count the triggers
    /// it is already inside.
    pub fn setup_triggers(&mut self, host: &mut MirrorHost, viewer_actor: Option<ActorId>) {
        if !self.occupancy.is_required() {
            return;
        }
        if viewer_actor.is_none() {
            host.diagnostics.notify(LogSeverity::Warn, "No viewer actor while setting up capture triggers");
        }
        self.occupancy.track(viewer_actor);
        let triggers: Vec<ActorId> = self.occupancy.triggers().copied().collect();
        for trigger in triggers {
            let overlapping = host.scene.actors_overlapping(trigger);
            self.occupancy.seed(trigger, &overlapping);
        }
    }

    pub fn on_trigger_begin_overlap(&mut self, trigger: ActorId, actor: ActorId) -> bool {
        self.occupancy.on_begin_overlap(trigger, actor)
    }

    pub fn on_trigger_end_overlap(&mut self, trigger: ActorId, actor: ActorId) -> bool {
        self.occupancy.on_end_overlap(trigger, actor)
    }

    // ===== PER FRAME =====

    /// Gate, reflect, cull and capture for every eye.
    ///
    /// `hidden` lists the other mirrors' surfaces, never rendered into
    /// this mirror's capture.
    pub fn tick(&mut self, host: &mut MirrorHost, hidden: &[ActorId]) -> Result<TickOutcome> {
        let viewer = host.scene.active_viewer();
        let ipd_half = self.binding.as_ref().map_or(0.0, |b| b.ipd_half);

        if self.config.debug_display.contains(DebugDisplay::ACTIVE_TRIGGERS) {
            host.diagnostics.draw_debug_text(
                self.surface.center(),
                &format!("{:?}: {} active trigger(s)", self.actor, self.occupancy.count()),
            );
        }

        let reasons = CaptureGate::evaluate(&GateInput {
            surface: &self.surface,
            requires_triggers: self.occupancy.is_required(),
            occupied_triggers: self.occupancy.count(),
            recently_visible: host.scene.was_recently_visible(self.actor),
            viewer_position: viewer.map(|v| v.pose.position),
            binding_ready: self.binding.is_some(),
            behind_margin: ipd_half,
        });
        self.report_skip(host, reasons);

        let (Some(viewer), Some(binding)) = (viewer, self.binding.clone()) else {
            return Ok(TickOutcome::Skipped(reasons));
        };
        if !reasons.is_empty() {
            return Ok(TickOutcome::Skipped(reasons));
        }

        let layout = self.config.eye_layout;
        if layout == EyeLayout::Stereo {
            let params = self.material_params(&viewer.pose, &binding);
            host.backend.update_material_params(self.actor, &params);
        }

        let mirrored = reflect(&self.surface, &viewer.pose);

        let show_only = if self.config.culling_enabled {
            let show_list = self.cull(host, &mirrored, &binding);
            let actors = show_list.actors().to_vec();
            self.last_show_list = Some(show_list);
            Some(actors)
        } else {
            None
        };

        // Stereo pulls the clip plane one unit behind the surface
        let normal = self.surface.normal();
        let clip_plane = ClipPlane {
            base: match layout {
                EyeLayout::Mono => self.surface.center(),
                EyeLayout::Stereo => self.surface.center() - normal,
            },
            normal,
        };

        let eyes = layout.eye_poses(&mirrored, ipd_half);
        for (eye_index, (pose, target)) in eyes.iter().zip(&binding.targets).enumerate() {
            host.backend.capture_scene(self.actor, &CaptureView {
                eye_index,
                pose: *pose,
                fov_degrees: binding.fov_degrees,
                target: *target,
                clip_plane,
                show_only: show_only.clone(),
                hidden: hidden.to_vec(),
            })?;
        }

        Ok(TickOutcome::Captured {
            eyes: eyes.len(),
            shown: show_only.map(|actors| actors.len()),
        })
    }

    /// Build the frustum from the mirrored camera, sweep the scene and
    /// classify the hits.
    fn cull(&mut self, host: &mut MirrorHost, mirrored: &Pose, binding: &RenderBinding) -> ShowList {
        let frustum = MirrorFrustum::build(&self.surface, mirrored, &FrustumParams {
            buffer_multiplier: self.config.culling_buffer_multiplier,
            ipd_half: binding.ipd_half,
            far_distance: self.config.culling_trace_distance,
            horizontal_fov_degrees: binding.fov_degrees,
        });

        if self.config.debug_display.contains(DebugDisplay::CULLING_PLANES) {
            for plane in &frustum.planes {
                host.diagnostics.draw_debug_plane(plane, self.surface.center(), DEBUG_PLANE_SIZE);
            }
        }

        let show_list = match self.config.culling_trace_channel {
            Some(channel) => {
                let volume = TraceVolume::new(
                    &self.surface,
                    mirrored,
                    &frustum,
                    self.config.culling_trace_distance,
                    channel,
                );
                let hits = host.scene.query_bounding_spheres(&volume);
                MirrorCuller::new().cull(&frustum, &hits, &self.config.always_visible)
            }
            None => MirrorCuller::new().cull(&frustum, &[], &self.config.always_visible),
        };

        mirror_trace!(SOURCE, "Mirror {:?} show list: {} actor(s)", self.actor, show_list.len());
        self.last_frustum = Some(frustum);
        show_list
    }

    /// Warn once when a configuration problem starts blocking captures.
    fn report_skip(&mut self, host: &mut MirrorHost, reasons: SkipReasons) {
        let fresh = reasons - self.last_skip;
        if fresh.contains(SkipReasons::NO_VIEWER) {
            mirror_warn!(SOURCE, "Mirror {:?}: no active viewer camera", self.actor);
            host.diagnostics.notify(LogSeverity::Warn, "Mirror has no active viewer camera");
        }
        if fresh.contains(SkipReasons::BINDING_NOT_READY) {
            host.diagnostics.notify(LogSeverity::Warn, "Mirror render target or material not bound");
        }
        if reasons != self.last_skip {
            mirror_trace!(SOURCE, "Mirror {:?} skip reasons {:?}", self.actor, reasons);
        }
        self.last_skip = reasons;
    }

    /// Location of the mirror surface, for debug output.
    pub fn location(&self) -> DVec3 {
        self.surface.center()
    }
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod tests;
