use crate::errors::{ OktogenError, Result };

/// Puts `text` on the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(OktogenError::Clipboard(String::from("nothing to copy")));
    }

    let mut ctx = copypasta_ext::try_context()
        .ok_or_else(|| OktogenError::Clipboard(String::from("no clipboard available")))?;

    ctx.set_contents(text.to_owned())
        .map_err(|e| OktogenError::Clipboard(e.to_string()))?;

    log::info!("copied {} characters to clipboard", text.chars().count());

    Ok(())
}
