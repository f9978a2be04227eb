use core::fmt;

/// A camera input which can be changed through a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Position,
    ForwardVector,
    UpVector,
    InterocularDistance,
    ConvergencePlaneDistance,
    Flipped,
    Shear,
    Mode,
    ConvergeOnNear,
    NearPlane,
    FarPlane,
    AspectRatio,
    Fov,
    GraphicsApi,
    Radius,
    Phi,
    Theta,
    Target,
}

/// The derived matrices recomputed after a [`Property`] changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derived {
    /// The left, right and center view matrices.
    View,
    /// The projection matrix.
    Projection,
}

impl Property {
    pub fn derived(self) -> Derived {
        match self {
            Property::NearPlane
            | Property::FarPlane
            | Property::AspectRatio
            | Property::Fov
            | Property::GraphicsApi => Derived::Projection,
            _ => Derived::View,
        }
    }
}

/// Decides how a camera tells the outside world that it changed.
///
/// The camera calls [`ChangeNotifier::notify`] synchronously after every mutation, once the
/// dependent matrices have already been recomputed, so a notifier may read the camera state
/// right away.
pub trait ChangeNotifier {
    fn notify(&mut self, property: Property);
}

/// No propagation. Readers pull the matrices every frame.
impl ChangeNotifier for () {
    #[inline(always)]
    fn notify(&mut self, _: Property) {}
}

/// Records every change in order.
impl ChangeNotifier for Vec<Property> {
    fn notify(&mut self, property: Property) {
        self.push(property);
    }
}

/// Dirty flag propagation: a renderer polls and clears the flags once per frame and only
/// re-uploads the matrices that changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DirtyFlags {
    pub view: bool,
    pub projection: bool,
}

impl DirtyFlags {
    pub fn is_dirty(&self) -> bool {
        self.view || self.projection
    }

    /// Returns the accumulated flags and resets them.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }
}

impl ChangeNotifier for DirtyFlags {
    fn notify(&mut self, property: Property) {
        match property.derived() {
            Derived::View => self.view = true,
            Derived::Projection => self.projection = true,
        }
    }
}

/// Observer propagation: a list of callbacks invoked for every change.
///
/// The callbacks are not required to be `Send`, so a camera using this notifier stays on the
/// thread that created it.
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Box<dyn FnMut(Property)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Property) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}

impl ChangeNotifier for Listeners {
    fn notify(&mut self, property: Property) {
        for listener in &mut self.listeners {
            listener(property);
        }
    }
}
