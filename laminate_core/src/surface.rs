// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface lifecycle control.
//!
//! A [`SurfaceHandler`] represents one top-level surface and walks it
//! through `Unregistered → Registered → Running` and back. Its data is
//! split into two independently locked halves:
//!
//! - **Link** — the status plus references to the [`UiManager`] and the
//!   backing [`ShadowTree`]. Registering, starting, and stopping take this
//!   lock exclusively.
//! - **Parameters** — module name, surface id, display mode, props, and
//!   layout inputs. Mutable at any status under their own lock.
//!
//! No call path holds both locks at once: methods that need both copy the
//! parameters out first, then take the link lock. Collapsing the two locks
//! into one would reintroduce the ordering hazard between parameter
//! setters and lifecycle transitions racing from different threads.
//!
//! Lifecycle contract violations (starting a running surface, stopping a
//! non-running one, dropping a handler that is still registered) are
//! programmer errors and panic.

use std::sync::{Arc, Weak};

use kurbo::Size;
use parking_lot::RwLock;

use crate::id::SurfaceId;
use crate::layout::{LayoutConstraints, LayoutContext};
use crate::props::SharedProps;
use crate::tree::{CommitMode, ShadowTree};

/// Lifecycle status of a [`SurfaceHandler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfaceStatus {
    /// Newly created or already-unregistered. The only status a handler
    /// may be dropped in.
    #[default]
    Unregistered,
    /// Holds a [`UiManager`] reference and is ready to start.
    Registered,
    /// Registered with a live backing tree.
    Running,
}

/// How a surface's visual side effects reach the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Commits mount normally.
    #[default]
    Visible,
    /// New commits are prepared but not mounted, keeping the surface ready
    /// for instant resumption.
    Suspended,
    /// The surface is off screen; new commits are not mounted. Unmounting
    /// of previously mounted views is left to the mounting layer.
    Hidden,
}

impl DisplayMode {
    /// The tree-level commit gate this display mode maps to.
    #[must_use]
    pub(crate) fn commit_mode(self) -> CommitMode {
        match self {
            DisplayMode::Visible => CommitMode::Normal,
            DisplayMode::Suspended | DisplayMode::Hidden => CommitMode::Suspended,
        }
    }
}

/// The collaborator that allocates, measures, and tears down the backing
/// trees of surfaces.
///
/// Implementations retain ownership of the trees they create, typically in
/// a [`ShadowTreeRegistry`](crate::registry::ShadowTreeRegistry); the
/// handler keeps only a weak link.
pub trait UiManager: Send + Sync {
    /// Creates the backing tree for a surface, seeds it with the given
    /// props and layout inputs, and makes it live.
    fn start_surface(
        &self,
        surface_id: SurfaceId,
        module_name: &str,
        props: SharedProps,
        layout_constraints: LayoutConstraints,
        layout_context: LayoutContext,
    ) -> Arc<ShadowTree>;

    /// Stops the surface and releases its tree.
    fn stop_surface(&self, surface_id: SurfaceId);

    /// Re-lays-out a running surface under new constraints.
    fn constraint_surface_layout(
        &self,
        surface_id: SurfaceId,
        layout_constraints: LayoutConstraints,
        layout_context: LayoutContext,
    );

    /// Measures the surface content under the given constraints.
    fn measure_surface(
        &self,
        surface_id: SurfaceId,
        layout_constraints: LayoutConstraints,
        layout_context: LayoutContext,
    ) -> Size;
}

struct Link {
    status: SurfaceStatus,
    ui_manager: Option<Arc<dyn UiManager>>,
    shadow_tree: Weak<ShadowTree>,
}

#[derive(Clone)]
struct Parameters {
    module_name: String,
    surface_id: SurfaceId,
    display_mode: DisplayMode,
    props: SharedProps,
    layout_constraints: LayoutConstraints,
    layout_context: LayoutContext,
}

/// Lifecycle state machine for one surface.
pub struct SurfaceHandler {
    link: RwLock<Link>,
    parameters: RwLock<Parameters>,
}

impl std::fmt::Debug for SurfaceHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.read();
        f.debug_struct("SurfaceHandler")
            .field("module_name", &parameters.module_name)
            .field("surface_id", &parameters.surface_id)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl SurfaceHandler {
    /// Creates an unregistered handler.
    #[must_use]
    pub fn new(module_name: impl Into<String>, surface_id: SurfaceId) -> Self {
        Self {
            link: RwLock::new(Link {
                status: SurfaceStatus::Unregistered,
                ui_manager: None,
                shadow_tree: Weak::new(),
            }),
            parameters: RwLock::new(Parameters {
                module_name: module_name.into(),
                surface_id,
                display_mode: DisplayMode::default(),
                props: SharedProps::default(),
                layout_constraints: LayoutConstraints::default(),
                layout_context: LayoutContext::default(),
            }),
        }
    }

    // -- Lifecycle --

    /// The momentary lifecycle status.
    #[must_use]
    pub fn status(&self) -> SurfaceStatus {
        self.link.read().status
    }

    /// Registers or unregisters the [`UiManager`].
    ///
    /// `Some` on an unregistered handler registers it; `None` on a
    /// registered handler unregisters it.
    ///
    /// # Panics
    ///
    /// Panics when called on a running surface.
    pub fn set_ui_manager(&self, ui_manager: Option<Arc<dyn UiManager>>) {
        let mut link = self.link.write();
        assert!(
            link.status != SurfaceStatus::Running,
            "cannot re-register a running surface"
        );

        link.status = if ui_manager.is_some() {
            SurfaceStatus::Registered
        } else {
            SurfaceStatus::Unregistered
        };
        link.ui_manager = ui_manager;
    }

    /// Starts the surface: allocates the backing tree via the
    /// [`UiManager`], seeded with the current props and layout inputs, and
    /// applies the current display mode.
    ///
    /// # Panics
    ///
    /// Panics unless the surface is registered and not running.
    pub fn start(&self) {
        let parameters = self.parameters.read().clone();

        let mut link = self.link.write();
        assert!(
            link.status == SurfaceStatus::Registered,
            "surface must be registered and not running to start"
        );
        let ui_manager = link
            .ui_manager
            .as_ref()
            .expect("registered surface must hold a UiManager");

        let shadow_tree = ui_manager.start_surface(
            parameters.surface_id,
            &parameters.module_name,
            Arc::clone(&parameters.props),
            parameters.layout_constraints,
            parameters.layout_context,
        );
        link.shadow_tree = Arc::downgrade(&shadow_tree);
        link.status = SurfaceStatus::Running;

        log::debug!(
            "surface {:?} ({}) started",
            parameters.surface_id,
            parameters.module_name,
        );

        apply_display_mode(&link, parameters.display_mode);
    }

    /// Stops the surface: tears down the mounted host views by committing
    /// an empty tree, then releases the tree via the [`UiManager`].
    ///
    /// # Panics
    ///
    /// Panics unless the surface is running.
    pub fn stop(&self) {
        let surface_id = self.parameters.read().surface_id;

        let mut link = self.link.write();
        assert!(
            link.status == SurfaceStatus::Running,
            "surface must be running to stop"
        );
        let ui_manager = link
            .ui_manager
            .as_ref()
            .expect("running surface must hold a UiManager")
            .clone();

        if let Some(shadow_tree) = link.shadow_tree.upgrade() {
            shadow_tree.commit_empty();
        }
        link.shadow_tree = Weak::new();
        link.status = SurfaceStatus::Registered;

        ui_manager.stop_surface(surface_id);

        log::debug!("surface {surface_id:?} stopped");
    }

    /// Measures the surface under the given constraints via the
    /// [`UiManager`]. Returns zero size unless the surface is running.
    #[must_use]
    pub fn measure(
        &self,
        layout_constraints: LayoutConstraints,
        layout_context: LayoutContext,
    ) -> Size {
        let surface_id = self.parameters.read().surface_id;

        let link = self.link.read();
        if link.status != SurfaceStatus::Running {
            return Size::ZERO;
        }
        let ui_manager = link
            .ui_manager
            .as_ref()
            .expect("running surface must hold a UiManager");
        ui_manager.measure_surface(surface_id, layout_constraints, layout_context)
    }

    // -- Parameters --

    /// The module name this surface renders.
    #[must_use]
    pub fn module_name(&self) -> String {
        self.parameters.read().module_name.clone()
    }

    /// The surface id.
    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.parameters.read().surface_id
    }

    /// Reassigns the surface id. Legal at any status; takes effect on the
    /// next start.
    pub fn set_surface_id(&self, surface_id: SurfaceId) {
        self.parameters.write().surface_id = surface_id;
    }

    /// The current surface props.
    #[must_use]
    pub fn props(&self) -> SharedProps {
        Arc::clone(&self.parameters.read().props)
    }

    /// Replaces the surface props. Legal at any status; a running surface
    /// picks them up on its next commit.
    pub fn set_props(&self, props: SharedProps) {
        self.parameters.write().props = props;
    }

    /// The current display mode.
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        self.parameters.read().display_mode
    }

    /// Switches the display mode. Legal at any status; when running, the
    /// mapped commit mode is pushed to the backing tree immediately.
    pub fn set_display_mode(&self, display_mode: DisplayMode) {
        {
            let mut parameters = self.parameters.write();
            if parameters.display_mode == display_mode {
                return;
            }
            parameters.display_mode = display_mode;
        }

        let link = self.link.read();
        if link.status == SurfaceStatus::Running {
            apply_display_mode(&link, display_mode);
        }
    }

    /// The layout constraints the surface was last constrained to.
    #[must_use]
    pub fn layout_constraints(&self) -> LayoutConstraints {
        self.parameters.read().layout_constraints
    }

    /// The layout context the surface was last constrained under.
    #[must_use]
    pub fn layout_context(&self) -> LayoutContext {
        self.parameters.read().layout_context
    }

    /// Stores new layout inputs and, when running, re-lays-out the surface
    /// via the [`UiManager`].
    pub fn constraint_layout(
        &self,
        layout_constraints: LayoutConstraints,
        layout_context: LayoutContext,
    ) {
        let surface_id = {
            let mut parameters = self.parameters.write();
            parameters.layout_constraints = layout_constraints;
            parameters.layout_context = layout_context;
            parameters.surface_id
        };

        let link = self.link.read();
        if link.status == SurfaceStatus::Running {
            if let Some(ui_manager) = link.ui_manager.as_ref() {
                ui_manager.constraint_surface_layout(
                    surface_id,
                    layout_constraints,
                    layout_context,
                );
            }
        }
    }
}

/// Pushes the display mode to the backing tree. The caller holds the link
/// lock; the tree's own lock nests strictly inside it.
fn apply_display_mode(link: &Link, display_mode: DisplayMode) {
    if let Some(shadow_tree) = link.shadow_tree.upgrade() {
        shadow_tree.set_commit_mode(display_mode.commit_mode());
    }
}

impl Drop for SurfaceHandler {
    fn drop(&mut self) {
        assert!(
            self.link.get_mut().status == SurfaceStatus::Unregistered,
            "surface handler dropped while registered"
        );
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::id::Tag;
    use crate::node::{ShadowNode, ShadowNodeFamily, SharedShadowNode};
    use crate::props::Props;
    use crate::registry::ShadowTreeRegistry;
    use crate::traits::NodeTraits;
    use crate::tree::{CommitStatus, Mounter, MountingTransaction};

    #[derive(Default)]
    struct RecordingMounter {
        transactions: Mutex<Vec<MountingTransaction>>,
    }

    impl Mounter for RecordingMounter {
        fn mount(&self, transaction: MountingTransaction) {
            self.transactions.lock().push(transaction);
        }
    }

    struct TestUiManager {
        registry: ShadowTreeRegistry,
        mounter: Arc<RecordingMounter>,
    }

    impl TestUiManager {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                registry: ShadowTreeRegistry::new(),
                mounter: Arc::new(RecordingMounter::default()),
            })
        }
    }

    impl UiManager for TestUiManager {
        fn start_surface(
            &self,
            surface_id: SurfaceId,
            _module_name: &str,
            _props: SharedProps,
            _layout_constraints: LayoutConstraints,
            _layout_context: LayoutContext,
        ) -> Arc<ShadowTree> {
            let root = Arc::new(ShadowNode::new(
                ShadowNodeFamily {
                    tag: Tag(surface_id.0),
                    surface_id,
                    component_name: "RootView",
                },
                NodeTraits::stacking_context(),
                Arc::new(Props::default()),
            ));
            let tree = Arc::new(ShadowTree::new(
                surface_id,
                root,
                Arc::clone(&self.mounter) as _,
            ));
            self.registry.add(Arc::clone(&tree));
            tree
        }

        fn stop_surface(&self, surface_id: SurfaceId) {
            self.registry.remove(surface_id);
        }

        fn constraint_surface_layout(
            &self,
            _surface_id: SurfaceId,
            _layout_constraints: LayoutConstraints,
            _layout_context: LayoutContext,
        ) {
        }

        fn measure_surface(
            &self,
            _surface_id: SurfaceId,
            layout_constraints: LayoutConstraints,
            _layout_context: LayoutContext,
        ) -> Size {
            layout_constraints.clamp(Size::new(320.0, 480.0))
        }
    }

    fn child(surface_id: SurfaceId, tag: i32) -> SharedShadowNode {
        Arc::new(ShadowNode::new(
            ShadowNodeFamily {
                tag: Tag(tag),
                surface_id,
                component_name: "View",
            },
            NodeTraits::stacking_context(),
            Arc::new(Props::default()),
        ))
    }

    #[test]
    fn full_lifecycle_round_trip() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        assert_eq!(handler.status(), SurfaceStatus::Unregistered);

        handler.set_ui_manager(Some(Arc::clone(&ui_manager) as _));
        assert_eq!(handler.status(), SurfaceStatus::Registered);

        handler.start();
        assert_eq!(handler.status(), SurfaceStatus::Running);
        assert!(ui_manager.registry.visit(SurfaceId(10), |_| {}));

        handler.stop();
        assert_eq!(handler.status(), SurfaceStatus::Registered);
        assert!(!ui_manager.registry.visit(SurfaceId(10), |_| {}));

        handler.set_ui_manager(None);
        assert_eq!(handler.status(), SurfaceStatus::Unregistered);
    }

    #[test]
    fn measure_returns_zero_unless_running() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        let constraints = LayoutConstraints::tight(Size::new(200.0, 200.0));

        assert_eq!(
            handler.measure(constraints, LayoutContext::default()),
            Size::ZERO
        );

        handler.set_ui_manager(Some(Arc::clone(&ui_manager) as _));
        handler.start();
        assert_eq!(
            handler.measure(constraints, LayoutContext::default()),
            Size::new(200.0, 200.0)
        );

        handler.stop();
        handler.set_ui_manager(None);
    }

    #[test]
    fn display_mode_set_before_start_reaches_the_tree() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        handler.set_display_mode(DisplayMode::Suspended);

        handler.set_ui_manager(Some(Arc::clone(&ui_manager) as _));
        handler.start();

        let mut commit_mode = None;
        ui_manager.registry.visit(SurfaceId(10), |tree| {
            commit_mode = Some(tree.commit_mode());
        });
        assert_eq!(commit_mode, Some(CommitMode::Suspended));

        handler.stop();
        handler.set_ui_manager(None);
    }

    #[test]
    fn display_mode_change_while_running_reaches_the_tree() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        handler.set_ui_manager(Some(Arc::clone(&ui_manager) as _));
        handler.start();

        handler.set_display_mode(DisplayMode::Hidden);
        let mut commit_mode = None;
        ui_manager.registry.visit(SurfaceId(10), |tree| {
            commit_mode = Some(tree.commit_mode());
        });
        assert_eq!(commit_mode, Some(CommitMode::Suspended));

        handler.set_display_mode(DisplayMode::Visible);
        ui_manager.registry.visit(SurfaceId(10), |tree| {
            commit_mode = Some(tree.commit_mode());
        });
        assert_eq!(commit_mode, Some(CommitMode::Normal));

        handler.stop();
        handler.set_ui_manager(None);
    }

    #[test]
    fn stop_tears_down_mounted_views() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        handler.set_ui_manager(Some(Arc::clone(&ui_manager) as _));
        handler.start();

        ui_manager.registry.visit(SurfaceId(10), |tree| {
            let status = tree.commit(|root| {
                Some(Arc::new(root.clone_with(
                    None,
                    Some(vec![child(SurfaceId(10), 100)]),
                )))
            });
            assert_eq!(status, CommitStatus::Succeeded);
        });

        handler.stop();

        let transactions = ui_manager.mounter.transactions.lock();
        // Content mount followed by the teardown commit.
        assert_eq!(transactions.len(), 2);
        assert!(transactions[1]
            .mutations
            .iter()
            .any(|mutation| matches!(mutation, crate::mutation::Mutation::Delete { .. })));
        drop(transactions);

        handler.set_ui_manager(None);
    }

    #[test]
    #[should_panic(expected = "registered and not running")]
    fn starting_an_unregistered_surface_panics() {
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        handler.start();
    }

    #[test]
    #[should_panic(expected = "must be running")]
    fn stopping_a_registered_surface_panics() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        handler.set_ui_manager(Some(ui_manager as _));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler.stop()));
        // Leave the handler in a droppable state before propagating.
        handler.set_ui_manager(None);
        std::panic::resume_unwind(result.unwrap_err());
    }

    #[test]
    #[should_panic(expected = "cannot re-register")]
    fn unregistering_a_running_surface_panics() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        handler.set_ui_manager(Some(Arc::clone(&ui_manager) as _));
        handler.start();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            handler.set_ui_manager(None);
        }));
        handler.stop();
        handler.set_ui_manager(None);
        std::panic::resume_unwind(result.unwrap_err());
    }

    #[test]
    #[should_panic(expected = "dropped while registered")]
    fn dropping_a_registered_handler_panics() {
        let ui_manager = TestUiManager::new();
        let handler = SurfaceHandler::new("Gallery", SurfaceId(10));
        handler.set_ui_manager(Some(ui_manager as _));
        drop(handler);
    }
}
