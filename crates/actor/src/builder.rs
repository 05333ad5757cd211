use stride_anim::{AnimationBlender, AnimationSink};
use stride_camera::CameraRig;
use stride_common::{ActorId, ConfigError, GroundProbe, RigidBody};
use stride_input::DeviceSource;
use stride_locomotion::LocomotionController;

use crate::config::ActorConfig;
use crate::coordinator::ActorCoordinator;

/// Collects an actor's collaborators and validates them once, up front.
///
/// Every collaborator is required. A missing one fails [`ActorBuilder::build`]
/// with [`ConfigError::MissingCollaborator`]; nothing is defaulted.
#[derive(Debug)]
pub struct ActorBuilder<B, G, A, D> {
    id: Option<ActorId>,
    config: ActorConfig,
    body: Option<B>,
    probe: Option<G>,
    sink: Option<A>,
    source: Option<D>,
}

impl<B, G, A, D> Default for ActorBuilder<B, G, A, D> {
    fn default() -> Self {
        Self {
            id: None,
            config: ActorConfig::default(),
            body: None,
            probe: None,
            sink: None,
            source: None,
        }
    }
}

impl<B, G, A, D> ActorBuilder<B, G, A, D>
where
    B: RigidBody,
    G: GroundProbe,
    A: AnimationSink,
    D: DeviceSource,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: ActorId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn config(mut self, config: ActorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input_source(mut self, source: D) -> Self {
        self.source = Some(source);
        self
    }

    pub fn rigid_body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn ground_probe(mut self, probe: G) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn animation_sink(mut self, sink: A) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Resolve collaborators and build the actor. The camera rig starts
    /// centred on the body.
    pub fn build(self) -> Result<ActorCoordinator<B, G, A, D>, ConfigError> {
        let body = self.body.ok_or(ConfigError::MissingCollaborator { role: "rigid body" })?;
        let probe = self.probe.ok_or(ConfigError::MissingCollaborator { role: "ground probe" })?;
        let sink = self
            .sink
            .ok_or(ConfigError::MissingCollaborator { role: "animation sink" })?;
        let source = self
            .source
            .ok_or(ConfigError::MissingCollaborator { role: "input source" })?;

        self.config.validate()?;
        let controller = LocomotionController::new(self.config.locomotion.clone())?;
        let camera = CameraRig::new(self.config.camera.clone(), body.position())?;
        let blender = AnimationBlender::new(self.config.blend.clone())?;
        let id = self.id.unwrap_or_default();

        tracing::info!(actor = %id.short(), position = ?body.position(), "actor built");
        Ok(ActorCoordinator::assemble(
            id,
            self.config.fixed_step,
            body,
            probe,
            sink,
            source,
            camera,
            controller,
            blender,
        ))
    }
}
