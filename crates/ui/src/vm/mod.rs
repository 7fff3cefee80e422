mod quiz_vm;

pub use quiz_vm::{
    SummaryVm, answer_placeholder, map_summary, progress_label, score_label, score_tone,
};
