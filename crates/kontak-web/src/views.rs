//! Server-rendered pages.
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Every template name ends in `.html`, which turns on HTML auto-escaping.

use axum::response::Html;
use kontak_core::{Contact, FieldError};
use minijinja::{Environment, Value, context};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

use crate::Result;

/// Shared layout wrapping every page except About.
pub const LAYOUT: &str = "layouts/main-layout.html";
/// Home page.
pub const INDEX: &str = "index.html";
/// Contact list.
pub const CONTACT_LIST: &str = "contact.html";
/// Add-contact form.
pub const CONTACT_ADD: &str = "contact-add.html";
/// Edit-contact form.
pub const CONTACT_EDIT: &str = "contact-edit.html";
/// Contact detail.
pub const CONTACT_DETAIL: &str = "detail.html";
/// Product page.
pub const PRODUCT: &str = "product.html";
/// About page (no layout).
pub const ABOUT: &str = "about.html";

const TEMPLATES: &[(&str, &str)] = &[
    (LAYOUT, include_str!("../templates/layouts/main-layout.html")),
    (INDEX, include_str!("../templates/index.html")),
    (CONTACT_LIST, include_str!("../templates/contact.html")),
    (CONTACT_ADD, include_str!("../templates/contact-add.html")),
    (CONTACT_EDIT, include_str!("../templates/contact-edit.html")),
    (CONTACT_DETAIL, include_str!("../templates/detail.html")),
    (PRODUCT, include_str!("../templates/product.html")),
    (ABOUT, include_str!("../templates/about.html")),
];

/// Characters escaped when a contact name becomes a path segment.
///
/// Covers everything HTML treats specially, so an encoded path can go into an
/// attribute without further escaping.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path of a contact's detail page.
pub fn contact_path(name: &str) -> String {
    format!("/contact/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

/// Path of a contact's edit form.
pub fn contact_edit_path(name: &str) -> String {
    format!("/contact/edit/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

/// What a template sees of a contact.
#[derive(Debug, Clone, Serialize)]
pub struct ContactView<'a> {
    id: String,
    name: &'a str,
    email: &'a str,
    nohp: &'a str,
    last_modified: Option<String>,
    href: Value,
    edit_href: Value,
}

impl<'a> From<&'a Contact> for ContactView<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: &contact.name,
            email: &contact.email,
            nohp: &contact.phone,
            last_modified: contact
                .last_modified
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            href: Value::from_safe_string(contact_path(&contact.name)),
            edit_href: Value::from_safe_string(contact_edit_path(&contact.name)),
        }
    }
}

/// The compiled template set.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile every template.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render a template with an arbitrary context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }

    /// Home page.
    pub fn home(&self) -> Result<Html<String>> {
        self.render(INDEX, context! { title => "Home", page => "Halaman Utama" })
    }

    /// About page.
    pub fn about(&self) -> Result<Html<String>> {
        self.render(ABOUT, context! { title => "About", page => "About" })
    }

    /// Product page.
    pub fn product(&self) -> Result<Html<String>> {
        self.render(PRODUCT, context! { title => "Produk", page => "Produk" })
    }

    /// Contact list with an optional status line.
    pub fn contact_list(&self, contacts: &[Contact], msg: Option<&str>) -> Result<Html<String>> {
        let contacts: Vec<ContactView<'_>> = contacts.iter().map(ContactView::from).collect();
        self.render(
            CONTACT_LIST,
            context! { title => "Kontak", page => "List Kontak", contacts, msg },
        )
    }

    /// Empty add form, with errors from a rejected submission.
    pub fn contact_add(&self, errors: &[FieldError]) -> Result<Html<String>> {
        self.render(
            CONTACT_ADD,
            context! { title => "Add Contact", page => "Form Tambah Kontak", errors },
        )
    }

    /// Edit form pre-filled from the stored contact.
    pub fn contact_edit(
        &self,
        contact: &Contact,
        errors: &[FieldError],
        msg: Option<&str>,
    ) -> Result<Html<String>> {
        self.render(
            CONTACT_EDIT,
            context! {
                title => "Edit Contact",
                page => "Form Edit Kontak",
                contact => ContactView::from(contact),
                errors,
                msg,
            },
        )
    }

    /// Detail page.
    pub fn contact_detail(&self, contact: &Contact) -> Result<Html<String>> {
        self.render(
            CONTACT_DETAIL,
            context! {
                title => format!("Detail {}", contact.name),
                page => format!("Detail Kontak {}", contact.name),
                contact => ContactView::from(contact),
            },
        )
    }
}
