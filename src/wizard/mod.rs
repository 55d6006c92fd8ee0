//! Stepwise form navigator shared by the health-profile and
//! biological-age flows.

pub mod completion;
pub mod dispatch;
pub mod engine;
pub mod flows;
pub mod interaction;
pub mod navigator;
pub mod progress;
pub mod registry;
pub mod sections;
pub mod session;

pub use completion::{is_complete, is_section_complete, FieldBucket};
pub use dispatch::{RenderContext, RenderDispatcher, RenderInterrupt, RenderOutcome};
pub use engine::{FormEngine, FormResult};
pub use flows::{FlowConfig, FlowKind, ProfileLayout};
pub use interaction::{
    ActionContext, ChecklistContext, ChecklistResponse, FormInteraction, GenerateOption,
    NavAction, Notice, NoticeKind, PromptContext, PromptResponse, SectionStatus, StepPosition,
};
pub use navigator::NavigatorState;
pub use progress::{AccuracyTable, AccuracyTier, ProgressPolicy};
pub use registry::{RenderFn, SectionDescriptor, SectionRegistry};
pub use session::FormSession;
