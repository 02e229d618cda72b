/// A question sent through the journal website's contact form.
#[derive(Debug, Clone)]
pub struct ContactQuery {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A message sent through the Adroid Connectz contact form.
#[derive(Debug, Clone)]
pub struct ConnectzQuery {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization: String,
    pub service: String,
    pub message: String,
}

impl ConnectzQuery {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
