mod contacts;
mod hardening;
mod pages;
