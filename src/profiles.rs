//! Profiles
//!
//! The storefront's record of a signed-up user. Sign-in itself belongs to the
//! auth provider; this is the contact and shipping data kept next to it.

use serde::{Deserialize, Serialize};

/// A user's stored profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email, fixed at sign-up.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Shipping address.
    pub address: String,
}

/// Edits made on the profile screen. The email cannot be changed there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Phone number.
    pub phone: String,

    /// Shipping address.
    pub address: String,
}

impl ProfileUpdate {
    /// Starts an edit from the stored profile.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
        }
    }

    /// Writes the edited fields over `profile`, keeping its email.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        profile.first_name.clone_from(&self.first_name);
        profile.last_name.clone_from(&self.last_name);
        profile.phone.clone_from(&self.phone);
        profile.address.clone_from(&self.address);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            first_name: "Nimal".to_string(),
            last_name: "Perera".to_string(),
            email: "nimal@example.lk".to_string(),
            phone: "0771234567".to_string(),
            address: "12 Galle Road, Colombo".to_string(),
        }
    }

    #[test]
    fn update_keeps_email() {
        let mut stored = profile();
        let mut update = ProfileUpdate::from_profile(&stored);
        update.address = "4 Lake Drive, Kandy".to_string();

        update.apply_to(&mut stored);

        assert_eq!(stored.address, "4 Lake Drive, Kandy");
        assert_eq!(stored.email, "nimal@example.lk");
    }

    #[test]
    fn stored_documents_use_camel_case_and_tolerate_gaps() -> TestResult {
        let yaml = serde_norway::to_string(&profile())?;

        assert!(yaml.contains("firstName: Nimal"));

        let partial: UserProfile = serde_norway::from_str("firstName: Nimal\n")?;

        assert_eq!(partial.first_name, "Nimal");
        assert!(partial.address.is_empty());

        Ok(())
    }
}
