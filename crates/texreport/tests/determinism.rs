//! Rendering the same report twice gives the same bytes.

use proptest::prelude::*;
use texreport::{Metadata, Report, ReportRenderer, Theme};

fn render(report: &Report) -> (String, String) {
    let rendered = ReportRenderer::new(Theme::builtin())
        .unwrap()
        .render(report)
        .unwrap();
    (rendered.class_source, rendered.document_source)
}

proptest! {
    #[test]
    fn rendering_is_deterministic(
        title in "\\PC{1,40}",
        subtitle in proptest::option::of("\\PC{0,20}"),
        chapters in proptest::collection::vec("[A-Za-z0-9 &%_#$]{1,20}", 0..5),
    ) {
        let mut metadata = Metadata::new(title).author("A. Author");
        metadata.subtitle = subtitle;
        let mut report = Report::new(metadata);
        for chapter in &chapters {
            report.chapter(chapter.as_str()).paragraph(chapter.as_str());
        }

        prop_assert_eq!(render(&report), render(&report));
    }
}
