use super::writer::PepZeroWriter;
use crate::error::Result;
use crate::model::{Pep, Topic};

/// `topic/index.rst`: a table of contents over the topic pages.
pub const TOPIC_INDEX: &str = "\
Topic Index
***********

PEPs are indexed by topic on the pages below:

.. toctree::
   :maxdepth: 1
   :titlesonly:
   :glob:

   *
";

fn topic_header(topic: Topic) -> String {
    let text = format!("{} PEPs", topic.title());
    format!("{}\n{}\n", text, "#".repeat(text.len()))
}

fn topic_intro(topic: Topic) -> String {
    format!(
        "\
This is the index of all Python Enhancement Proposals (PEPs) labelled
under the '{}' topic. This is a sub-index of :pep:`0`,
the PEP index.
",
        topic.title()
    )
}

/// Render `topic/<slug>.rst` over the PEPs filed under `topic`.
pub fn write_topic(topic: Topic, peps: &[Pep]) -> Result<String> {
    let filtered: Vec<Pep> = peps
        .iter()
        .filter(|pep| pep.has_topic(topic))
        .cloned()
        .collect();
    tracing::debug!(topic = topic.slug(), count = filtered.len(), "Writing topic index");
    PepZeroWriter::new().write(&filtered, &topic_header(topic), &topic_intro(topic), false)
}
