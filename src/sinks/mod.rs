//! Record sinks. The crawler hands every normalized meeting to a sink;
//! what happens next (serialization, storage, queues) is the caller's
//! concern.

use std::io::Write;

use crate::items::Meeting;
use crate::ScraperResult;

pub trait MeetingSink: Send {
    fn emit(&mut self, meeting: Meeting) -> ScraperResult<()>;
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    meetings: Vec<Meeting>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn into_meetings(self) -> Vec<Meeting> {
        self.meetings
    }
}

impl MeetingSink for VecSink {
    fn emit(&mut self, meeting: Meeting) -> ScraperResult<()> {
        self.meetings.push(meeting);
        Ok(())
    }
}

/// Writes one JSON object per line to the wrapped writer.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> MeetingSink for JsonLinesSink<W> {
    fn emit(&mut self, meeting: Meeting) -> ScraperResult<()> {
        serde_json::to_writer(&mut self.writer, &meeting)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
