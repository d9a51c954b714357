pub(crate) mod meeting;

pub use meeting::{Classification, Link, Location, Meeting, MeetingDraft, MeetingStatus};
