//! File attachment types.
//!
//! File rows are append-only: replacing a profile image or a post
//! attachment inserts a fresh row and repoints the owner's `file_id`.
//! Orphaned rows are left in place.

/// Category discriminator stored in `files.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Profile,
    PostAttachment,
}

impl FileCategory {
    /// Database representation.
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Profile => 1,
            Self::PostAttachment => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_match_the_schema() {
        assert_eq!(FileCategory::Profile.as_i16(), 1);
        assert_eq!(FileCategory::PostAttachment.as_i16(), 2);
    }
}
