use crate::helpers::{create_book, create_review, create_token, run_bookreview, stdout_json};
use crate::test_macros::define_cli_auth_test;

define_cli_auth_test!(
    test_add_review_requires_authentication,
    &["review", "add", "--book-id", "1", "--rating", "4", "--text", "Fine"]
);
define_cli_auth_test!(
    test_update_review_requires_authentication,
    &["review", "update", "--id", "1", "--rating", "3"]
);
define_cli_auth_test!(
    test_delete_review_requires_authentication,
    &["review", "delete", "--id", "1"]
);

#[test]
fn test_second_review_of_same_book_is_a_conflict() {
    let token = create_token("cli-duplicate-review");
    let book_id = create_book("Reviewed Once", &token);
    create_review(&book_id, "4", &token);

    let output = run_bookreview(
        &[
            "review",
            "add",
            "--book-id",
            &book_id,
            "--rating",
            "2",
            "--text",
            "Changed my mind",
        ],
        &[("BOOKREVIEW_TOKEN", &token)],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("409"));
}

#[test]
fn test_update_review_changes_rating() {
    let token = create_token("cli-update-review");
    let book_id = create_book("Rerated Novel", &token);
    let review_id = create_review(&book_id, "2", &token);

    let output = run_bookreview(
        &["review", "update", "--id", &review_id, "--rating", "5"],
        &[("BOOKREVIEW_TOKEN", &token)],
    );

    let review = stdout_json(&output);
    assert_eq!(review["rating"], 5);
    assert_eq!(review["reviewText"], "Worth reading");
}

#[test]
fn test_delete_review_updates_book_average() {
    let owner = create_token("cli-delete-review-owner");
    let reader = create_token("cli-delete-review-reader");
    let book_id = create_book("Averaged Novel", &owner);
    create_review(&book_id, "5", &owner);
    let review_id = create_review(&book_id, "1", &reader);

    let output = run_bookreview(
        &["review", "delete", "--id", &review_id],
        &[("BOOKREVIEW_TOKEN", &reader)],
    );
    assert!(
        output.status.success(),
        "review delete should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let detail = stdout_json(&run_bookreview(&["book", "get", "--id", &book_id], &[]));
    assert_eq!(detail["averageRating"], 5.0);
    assert_eq!(detail["reviews"].as_array().map(Vec::len), Some(1));
}
