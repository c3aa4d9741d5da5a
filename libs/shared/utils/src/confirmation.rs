use rand::{distributions::Alphanumeric, Rng};

pub const CONFIRMATION_CODE_LEN: usize = 8;

/// Short uppercase code the patient quotes at the front desk.
pub fn generate_confirmation_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CONFIRMATION_CODE_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}
