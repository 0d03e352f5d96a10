mod speech_to_text_vendor;
mod vendor_error;

pub use speech_to_text_vendor::SpeechToTextVendor;
pub use vendor_error::VendorError;
