pub mod disclosure;
pub mod error;
pub mod panel;
pub mod session;
pub mod traits;

pub use disclosure::{DisclosureSync, RowDisclosure};
pub use error::SessionError;
pub use panel::Panel;
pub use session::{ArticleView, DraftContent, Phase, Session, SubmissionDraft, ViewState};
pub use traits::AnalysisBackend;
