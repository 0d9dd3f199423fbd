use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(super) struct SetTxtRequest {
    pub domain: String,
    pub key: String,
    pub value: String,
}

impl SetTxtRequest {
    pub fn non_empty(&self) -> Result<(), Error> {
        if self.domain.is_empty() || self.key.is_empty() || self.value.is_empty() {
            return Err(Error::InvalidTxtRequest);
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, Default, Ord, PartialOrd, Eq, PartialEq)]
pub(super) struct SetTxtResult {
    pub domain: String,
    pub key: String,
    pub value: String,
}

impl From<SetTxtRequest> for SetTxtResult {
    fn from(req: SetTxtRequest) -> Self {
        SetTxtResult {
            domain: req.domain,
            key: req.key,
            value: req.value,
        }
    }
}
