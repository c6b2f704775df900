use athena_core::{Fragment, InstrumentId, Period};

/// Push target for history rows
///
/// History pulls are synchronous: while `pull_bars`/`pull_ticks` runs,
/// the engine pushes rows one at a time into the sink and marks the final
/// one with `is_last`. An empty history is signalled as a single call
/// with `None` and `is_last = true`, or by no calls at all.
pub trait FragmentSink {
    fn bar_fragment(
        &mut self,
        instrument: &InstrumentId,
        period: &Period,
        fragment: Option<Fragment>,
        is_last: bool,
    );

    fn tick_fragment(&mut self, instrument: &InstrumentId, fragment: Option<Fragment>, is_last: bool);
}
