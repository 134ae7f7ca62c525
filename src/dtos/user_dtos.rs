use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BanUserIn {
    pub banned: bool,
}
