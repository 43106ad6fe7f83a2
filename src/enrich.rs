use crate::document::{SINGLE_DIG_COLLECTION, StructuredDocument};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnrichError {
    #[error("anchor record of type {doc_type} has no child to attach collections to")]
    AnchorWithoutChild { doc_type: String },
}

/// Appends each label as a `singleDigCollection` value on the working node.
/// For anchor records the working node is the first child and the anchor
/// receives the same labels.
///
/// Labels are appended as given; repeated calls accumulate duplicates.
pub fn attach_collections(
    document: &mut StructuredDocument,
    collections: &[String],
) -> Result<(), EnrichError> {
    if collections.is_empty() {
        return Ok(());
    }

    let anchor = &mut document.logical;
    if !anchor.is_anchor() {
        for collection in collections {
            anchor.add_metadata(SINGLE_DIG_COLLECTION, collection);
        }
        return Ok(());
    }

    let doc_type = anchor.doc_type.name().to_owned();
    let working = anchor
        .first_child_mut()
        .ok_or(EnrichError::AnchorWithoutChild { doc_type })?;
    for collection in collections {
        working.add_metadata(SINGLE_DIG_COLLECTION, collection);
    }
    for collection in collections {
        anchor.add_metadata(SINGLE_DIG_COLLECTION, collection);
    }
    Ok(())
}
