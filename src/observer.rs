/// Something to tell once every pair of a puzzle is connected.
///
/// Any `FnMut()` closure is an observer.
pub trait CompletionObserver {
    /// Called exactly once per board, the first time it is solved.
    fn on_completed(&mut self);
}

impl<F> CompletionObserver for F
where
    F: FnMut(),
{
    fn on_completed(&mut self) {
        self()
    }
}
