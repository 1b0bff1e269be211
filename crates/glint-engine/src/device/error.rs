/// What the caller should do after a surface acquisition error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame can be acquired normally.
    Reconfigured,
    /// Transient error; drop this frame only.
    SkipFrame,
    /// The device cannot present anymore; the frame loop must close.
    Fatal,
}
