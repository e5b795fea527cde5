#![allow(dead_code, unused_imports)]

pub use execprobe_test_utils::builders;
pub use execprobe_test_utils::fake_transport::FakeTransport;
pub use execprobe_test_utils::{argv, init_tracing, with_timeout};
