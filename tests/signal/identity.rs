use platkit::signal::{all, name_to_number, number_to_name, terminating};

#[test]
fn listing_is_unique_by_name_and_parses_back() {
    let mut seen = std::collections::HashSet::new();
    for (n, name) in all() {
        assert!(seen.insert(name), "duplicate {name}");
        assert_eq!(name_to_number(name), Some(n));
        assert_eq!(name_to_number(&format!("SIG{name}")), Some(n));
    }
}

#[test]
fn common_names_resolve() {
    assert_eq!(name_to_number("TERM"), Some(libc::SIGTERM));
    assert_eq!(name_to_number("sigint"), Some(libc::SIGINT));
    assert_eq!(number_to_name(libc::SIGHUP).as_deref(), Some("HUP"));
    assert_eq!(number_to_name(libc::SIGCHLD).as_deref(), Some("CHLD"));
}

#[test]
fn terminating_is_a_prefix_of_the_listing_minus_kill() {
    let listed: Vec<_> = all().collect();
    let term: Vec<_> = terminating().collect();
    let cut = listed.iter().position(|&(n, _)| n == libc::SIGCHLD).unwrap();
    let expected: Vec<_> = listed[..cut]
        .iter()
        .copied()
        .filter(|&(n, _)| n != libc::SIGKILL)
        .collect();
    assert_eq!(term, expected);
}

#[cfg(target_os = "linux")]
#[test]
fn aliases_render_as_the_first_name() {
    assert_eq!(name_to_number("POLL"), Some(libc::SIGIO));
    assert_eq!(number_to_name(libc::SIGPOLL).as_deref(), Some("IO"));
}
