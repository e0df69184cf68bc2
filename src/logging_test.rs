use crate::logging::{init, init_for_tests};

#[test]
fn init_refuses_to_replace_an_installed_subscriber() {
    init_for_tests();
    assert!(init().is_err());
}
