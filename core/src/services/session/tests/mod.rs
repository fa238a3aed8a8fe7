mod codec_tests;
mod issuer_tests;
