use std::marker::PhantomData;

use super::types::ButtonId;

/// Double-buffered two-state inputs with edge queries.
///
/// `current` holds this tick's poll, `previous` the poll of the tick before. Both are
/// plain arrays; `refresh` copies `current` into `previous` by value and only then
/// overwrites `current`, so edges stay detectable for exactly one tick.
///
/// `N` must equal `B::ALL.len()`.
#[derive(Debug, Clone)]
pub struct ButtonStates<B: ButtonId, const N: usize> {
    current: [bool; N],
    previous: [bool; N],
    _ids: PhantomData<B>,
}

impl<B: ButtonId, const N: usize> Default for ButtonStates<B, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ButtonId, const N: usize> ButtonStates<B, N> {
    /// All inputs start released in both buffers.
    pub fn new() -> Self {
        debug_assert_eq!(B::ALL.len(), N, "ButtonStates slot count does not match id set");
        Self {
            current: [false; N],
            previous: [false; N],
            _ids: PhantomData,
        }
    }

    /// Starts a new tick: latches the current buffer, then polls every id in scan order.
    pub fn refresh(&mut self, mut poll: impl FnMut(B) -> bool) {
        self.previous = self.current;
        for &id in B::ALL {
            self.current[id.index()] = poll(id);
        }
    }

    #[inline]
    pub fn is_down(&self, id: B) -> bool {
        self.current[id.index()]
    }

    #[inline]
    pub fn is_up(&self, id: B) -> bool {
        !self.current[id.index()]
    }

    /// Rising edge: up last tick, down this tick.
    #[inline]
    pub fn is_pressed(&self, id: B) -> bool {
        let i = id.index();
        self.current[i] && !self.previous[i]
    }

    /// Falling edge: down last tick, up this tick.
    #[inline]
    pub fn is_released(&self, id: B) -> bool {
        let i = id.index();
        !self.current[i] && self.previous[i]
    }

    /// Ids currently held, in scan order.
    pub fn down(&self) -> impl Iterator<Item = B> + '_ {
        B::ALL.iter().copied().filter(|&id| self.is_down(id))
    }

    /// Ids that went down this tick, in scan order.
    pub fn pressed(&self) -> impl Iterator<Item = B> + '_ {
        B::ALL.iter().copied().filter(|&id| self.is_pressed(id))
    }

    /// Ids that went up this tick, in scan order.
    pub fn released(&self) -> impl Iterator<Item = B> + '_ {
        B::ALL.iter().copied().filter(|&id| self.is_released(id))
    }
}
