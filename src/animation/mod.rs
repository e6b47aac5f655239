/// Hold → transition → hold frame scheduling.
pub mod sequencer;
