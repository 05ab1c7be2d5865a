use super::*;

fn submission(file_url: &str) -> Submission {
    serde_json::from_value(serde_json::json!({ "_id": "s1", "fileUrl": file_url })).unwrap()
}

#[test]
fn submission_label_uses_last_path_segment() {
    assert_eq!(submission_label(&submission("/uploads/papers/final.pdf")), "final.pdf");
    assert_eq!(submission_label(&submission("draft.docx")), "draft.docx");
}

#[test]
fn submission_label_ignores_trailing_slash() {
    assert_eq!(submission_label(&submission("/uploads/x/")), "x");
}

#[test]
fn retain_staged_drops_handles_of_discarded_files() {
    let mut handles: std::collections::HashMap<u64, &str> = [(1, "a.pdf"), (2, "b.pdf"), (3, "c.pdf")].into_iter().collect();
    let staged = vec![StagedFile { key: 2, name: "b.pdf".to_owned() }];
    retain_staged(&mut handles, &staged);
    assert_eq!(handles.into_iter().collect::<Vec<_>>(), vec![(2, "b.pdf")]);

    let mut handles: std::collections::HashMap<u64, &str> = [(7, "x.doc")].into_iter().collect();
    retain_staged(&mut handles, &[]);
    assert!(handles.is_empty());
}
