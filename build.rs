//! Retrieves information about the version of the engine from Git and the
//! build environment. This information is then written to a file in the output
//! directory and can be accessed at runtime by the engine.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
