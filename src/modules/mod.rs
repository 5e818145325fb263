pub mod auth;
pub mod catalog;
pub mod chat;
pub mod favorites;
pub mod outfits;
pub mod preferences;
pub mod stylist;
pub mod tryon;
pub mod wardrobe;
