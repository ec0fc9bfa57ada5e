//! User-facing message catalogue.
//!
//! The application speaks Indonesian; every string shown to a visitor lives
//! here so handlers and rules refer to them by name.

/// Name field left empty.
pub const NAME_REQUIRED: &str = "Nama tak boleh kosong";
/// Name already taken by another contact.
pub const NAME_TAKEN: &str = "Nama sudah digunakan";
/// Email field left empty.
pub const EMAIL_REQUIRED: &str = "Email tak boleh kosong";
/// Email does not look like an address.
pub const EMAIL_INVALID: &str = "Format email salah";
/// Phone field left empty.
pub const PHONE_REQUIRED: &str = "Nomor HP tak boleh kosong";
/// Phone contains something other than digits.
pub const PHONE_NOT_NUMERIC: &str = "Nomor HP harus berupa angka";
/// Phone is not an Indonesian mobile number.
pub const PHONE_INVALID: &str = "Format Nomor HP salah";

/// Flash after a successful create.
pub const CONTACT_ADDED: &str = "Data kontak berhasil ditambahkan";
/// Flash after a successful edit.
pub const CONTACT_UPDATED: &str = "Data kontak berhasil diedit";
/// Flash after a successful delete.
pub const CONTACT_DELETED: &str = "Kontak berhasil dihapus";
/// Flash when the targeted contact does not exist.
pub const CONTACT_NOT_FOUND: &str = "Kontak yang dimaksud tidak ditemukan";
/// Flash when the store could not complete a request.
pub const STORE_FAILURE: &str = "Terjadi kesalahan pada database, silakan coba lagi";
