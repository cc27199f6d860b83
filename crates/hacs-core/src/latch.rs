/// One-shot flag: flips false -> true at most once per instance.
///
/// The only way back to `false` is replacing the owner, which is what a scene
/// reset does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latch(bool);

impl Latch {
    /// Set the latch. Returns `true` only on the call that actually flipped it.
    #[inline]
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.0, true)
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0
    }
}
