//! Generic named-device capability shared by every hardware handle.

/// Spin/travel direction for motors and servos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// The operations every device exposes regardless of its capability
/// category: identity, connection metadata, and shutdown.
///
/// Handles obtained through injection are shared read-only references, so
/// every method takes `&self`; drivers that track state are expected to use
/// interior mutability. `close()` belongs to the directory that owns the
/// device — control units must not call it on an injected handle.
pub trait Device: Send + Sync {
    /// The configured name of this device, e.g. `"motor_left"`.
    fn name(&self) -> &str;

    /// Human-readable connection information, e.g. a bus address or port.
    fn connection_info(&self) -> String;

    /// Driver version number.
    fn version(&self) -> i32;

    /// Release the underlying hardware resource.
    fn close(&self);
}
