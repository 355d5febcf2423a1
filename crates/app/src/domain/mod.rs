//! KindHope Domain Concerns

pub mod carts;
pub mod checkout;
pub mod donations;
pub mod listings;
pub mod profiles;
pub mod subscription;
