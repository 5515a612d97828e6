use std::sync::OnceLock;

use openssl::rsa::Rsa;

use super::FirebaseAdmin;
use crate::ServiceAccount;

pub const PROJECT_ID: &str = "demo-tokencreator";
pub const PRIVATE_KEY_ID: &str = "test-key-id";
pub const CLIENT_EMAIL: &str = "firebase-adminsdk@demo-tokencreator.iam.gserviceaccount.com";

struct KeyPair {
    private_pem: String,
    public_pem: String,
}

// RSA generation is slow, so every test shares one key.
fn key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();

    KEY_PAIR.get_or_init(|| {
        let rsa = Rsa::generate(2048).expect("Failed to generate RSA key");
        KeyPair {
            private_pem: String::from_utf8(rsa.private_key_to_pem().unwrap()).unwrap(),
            public_pem: String::from_utf8(rsa.public_key_to_pem().unwrap()).unwrap(),
        }
    })
}

pub fn public_key_pem() -> &'static str {
    &key_pair().public_pem
}

pub fn service_account() -> ServiceAccount {
    ServiceAccount {
        project_id: PROJECT_ID.to_string(),
        private_key: key_pair().private_pem.clone(),
        private_key_id: PRIVATE_KEY_ID.to_string(),
        client_email: CLIENT_EMAIL.to_string(),
        client_id: None,
    }
}

pub fn admin() -> FirebaseAdmin {
    FirebaseAdmin::new(service_account(), PROJECT_ID).unwrap()
}
