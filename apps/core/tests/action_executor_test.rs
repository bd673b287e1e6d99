use siteswitch_core::action_executor::{
    resolve_target, validate_url, LaunchError, NavigationTarget, SiteAction,
};
use siteswitch_core::model::Site;

fn site() -> Site {
    Site::new(
        9,
        "Docs",
        "https://docs.example.org/",
        "https://docs.example.org/wp-admin",
    )
}

#[test]
fn dashboard_navigates_current_document() {
    assert_eq!(
        resolve_target(&site(), SiteAction::Dashboard),
        Ok(NavigationTarget::CurrentDocument(
            "https://docs.example.org/wp-admin".to_string()
        ))
    );
}

#[test]
fn visit_opens_public_url_in_new_context() {
    assert_eq!(
        resolve_target(&site(), SiteAction::Visit),
        Ok(NavigationTarget::NewContext("https://docs.example.org/".to_string()))
    );
}

#[test]
fn new_post_deep_links_under_admin() {
    assert_eq!(
        resolve_target(&site(), SiteAction::NewPost),
        Ok(NavigationTarget::CurrentDocument(
            "https://docs.example.org/wp-admin/post-new.php".to_string()
        ))
    );
}

#[test]
fn action_keys_fall_back_to_dashboard() {
    assert_eq!(SiteAction::from_key(Some("visit")), SiteAction::Visit);
    assert_eq!(SiteAction::from_key(Some("new-post")), SiteAction::NewPost);
    assert_eq!(SiteAction::from_key(Some("trash")), SiteAction::Dashboard);
    assert_eq!(SiteAction::from_key(None), SiteAction::Dashboard);
}

#[test]
fn rejects_empty_and_relative_urls() {
    assert_eq!(validate_url("  "), Err(LaunchError::EmptyUrl));
    assert_eq!(
        validate_url("/wp-admin/"),
        Err(LaunchError::NotAbsolute("/wp-admin/".to_string()))
    );
}
