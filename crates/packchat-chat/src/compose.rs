//! Request composition: user text, attachment text and pack selection.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use packchat_core::{Attachment, ExtractorRegistry, Pack, PackId, QueryPayload, Turn};

use crate::TRACING_TARGET;

/// Display value of the "no pack" selection.
const NO_PACK: &str = "None";

/// Which pack a query is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PackSelection {
    /// Not scoped to any pack; shown as `"None"`.
    #[default]
    None,
    /// Pack chosen by its exact name.
    Named(String),
    /// Pack chosen by its identifier.
    Id(PackId),
}

impl PackSelection {
    /// The choices offered to the user: `"None"` followed by every pack name.
    pub fn options(packs: &[Pack]) -> Vec<String> {
        std::iter::once(NO_PACK.to_owned())
            .chain(packs.iter().map(|pack| pack.name.clone()))
            .collect()
    }

    /// Resolves the selection against the known packs.
    ///
    /// [`PackSelection::None`] always resolves to no pack, whatever the
    /// listing holds.
    pub fn resolve(&self, known_packs: &[Pack]) -> Result<Option<PackId>, ComposeError> {
        let found = match self {
            Self::None => return Ok(None),
            Self::Named(name) => known_packs.iter().find(|pack| &pack.name == name),
            Self::Id(id) => known_packs.iter().find(|pack| &pack.id == id),
        };

        found
            .map(|pack| Some(pack.id.clone()))
            .ok_or_else(|| ComposeError::UnknownPack(self.to_string()))
    }
}

impl fmt::Display for PackSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str(NO_PACK),
            Self::Named(name) => f.write_str(name),
            Self::Id(id) => write!(f, "#{id}"),
        }
    }
}

impl FromStr for PackSelection {
    type Err = Infallible;

    /// `"None"` and blank input select no pack; anything else is a name.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == NO_PACK {
            Ok(Self::None)
        } else {
            Ok(Self::Named(trimmed.to_owned()))
        }
    }
}

/// Local validation failure; nothing is sent when composing fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// The selected pack is not in the current listing.
    #[error("Invalid pack selected: no pack matches '{0}'. Please try again.")]
    UnknownPack(String),
}

/// Builds query payloads, extracting attachment text through a registry.
#[derive(Debug, Clone)]
pub struct Composer {
    registry: ExtractorRegistry,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(ExtractorRegistry::with_defaults())
    }
}

impl Composer {
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Composes the payload for one user turn.
    ///
    /// The pack is validated first. Each attachment's text is then
    /// extracted; an attachment that fails to extract is logged and skipped.
    /// Extracted texts are joined by `\n` and follow the user text after a
    /// single `\n`. `history` is sent as given.
    pub fn compose(
        &self,
        user_text: &str,
        attachments: &[Attachment],
        selection: &PackSelection,
        known_packs: &[Pack],
        history: &[Turn],
    ) -> Result<QueryPayload, ComposeError> {
        let pack_id = selection.resolve(known_packs).inspect_err(|_| {
            tracing::warn!(
                target: TRACING_TARGET,
                selection = %selection,
                known = known_packs.len(),
                "Invalid pack selected, no matching pack ID found"
            );
        })?;

        let texts: Vec<String> = attachments
            .iter()
            .filter_map(|attachment| match self.registry.extract(attachment) {
                Ok(text) => text,
                Err(error) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        file = %attachment.name,
                        error = %error.to_chain_string(),
                        "Skipping attachment that failed to extract"
                    );
                    None
                }
            })
            .collect();

        let user_message = if texts.is_empty() {
            user_text.to_owned()
        } else {
            format!("{user_text}\n{}", texts.join("\n"))
        };

        Ok(QueryPayload::new(user_message, pack_id, history.to_vec()))
    }
}

/// Composes a payload with the default extractors.
///
/// See [`Composer::compose`].
pub fn compose(
    user_text: &str,
    attachments: &[Attachment],
    selection: &PackSelection,
    known_packs: &[Pack],
    history: &[Turn],
) -> Result<QueryPayload, ComposeError> {
    Composer::default().compose(user_text, attachments, selection, known_packs, history)
}
