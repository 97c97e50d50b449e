//! Slide illustration packs.
//!
//! The deck builder picks up `slide-NN.png` for each analysis slide. This
//! module produces those files in two steps, so the prompts can be reviewed
//! or edited between them:
//!
//! ```text
//! report.md ──plan──▶ images.json ──generate──▶ images/slide-05.png …
//!            (offline)              (HTTP gateway)
//! ```
//!
//! 1. [`plan`]     — one prompt per analysis slide, numbered the way the
//!    deck numbers its pages
//! 2. [`generate`] — send each prompt to the gateway and save the result

pub mod generate;
pub mod plan;

pub use generate::generate_images;
pub use plan::{make_plan, read_plan, write_plan, ImagePlan, PlanItem, DEFAULT_START_SLIDE};
