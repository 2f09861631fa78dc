//! Localized user-facing messages.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Language of the messages returned with results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &ENGLISH,
            Locale::Tr => &TURKISH,
        }
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "tr" => Ok(Locale::Tr),
            other => Err(DomainError::validation(format!("unsupported locale '{}'", other))),
        }
    }
}

/// Message catalog for one locale.
#[derive(Debug)]
pub struct Messages {
    pub success: &'static str,
    pub member_added: &'static str,
    pub member_updated: &'static str,
    pub member_deleted: &'static str,
    pub member_not_found: &'static str,
    pub identity_number_already_exists: &'static str,
    pub trainer_added: &'static str,
    pub trainer_updated: &'static str,
    pub trainer_deleted: &'static str,
    pub trainer_not_found: &'static str,
    pub trainer_email_already_exists: &'static str,
    pub authorization_denied: &'static str,
}

pub static ENGLISH: Messages = Messages {
    success: "Operation completed successfully",
    member_added: "Member added successfully.",
    member_updated: "Member updated.",
    member_deleted: "Member deleted.",
    member_not_found: "Member not found",
    identity_number_already_exists: "Identity number already exists",
    trainer_added: "Trainer added successfully.",
    trainer_updated: "Trainer updated.",
    trainer_deleted: "Trainer deleted.",
    trainer_not_found: "Trainer not found",
    trainer_email_already_exists: "Trainer email already exists",
    authorization_denied: "You are not authorized for this operation",
};

pub static TURKISH: Messages = Messages {
    success: "İşlem başarılı",
    member_added: "Üye başarıyla eklendi.",
    member_updated: "Üye güncellendi.",
    member_deleted: "Üye silindi.",
    member_not_found: "Üye bulunamadı",
    identity_number_already_exists: "Bu kimlik numarası zaten kayıtlı",
    trainer_added: "Eğitmen başarıyla eklendi.",
    trainer_updated: "Eğitmen güncellendi.",
    trainer_deleted: "Eğitmen silindi.",
    trainer_not_found: "Eğitmen bulunamadı",
    trainer_email_already_exists: "Bu e-posta adresi başka bir eğitmene ait",
    authorization_denied: "Bu işlem için yetkiniz yok",
};
