use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HanoiError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(HanoiError::font("x").to_string().contains("font error:"));
    assert!(HanoiError::render("x").to_string().contains("render error:"));
    assert!(HanoiError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = HanoiError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn anyhow_context_converts_into_other() {
    fn fails() -> HanoiResult<()> {
        use anyhow::Context as _;
        Err::<(), _>(std::io::Error::other("denied")).context("write frame 'x.png'")?;
        Ok(())
    }

    let err = fails().unwrap_err();
    assert!(matches!(err, HanoiError::Other(_)));
    assert!(err.to_string().contains("write frame"));
}
