// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{self, Write},
          sync::Arc};

use crate::{OutputDevice, StdMutex, StdoutMock};

pub trait OutputDeviceExt {
    /// A mock device that captures everything written to it in the returned
    /// [`StdoutMock`].
    fn new_mock() -> (OutputDevice, StdoutMock);

    /// Like [`OutputDeviceExt::new_mock()`], but only the first `ok_flush_count`
    /// flushes succeed. Every flush after that fails, the way a closed terminal would.
    fn new_mock_with_failing_flush(ok_flush_count: usize) -> (OutputDevice, StdoutMock);
}

impl OutputDeviceExt for OutputDevice {
    fn new_mock() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(stdout_mock.clone())),
            is_mock: true,
        };
        (this, stdout_mock)
    }

    fn new_mock_with_failing_flush(ok_flush_count: usize) -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let writer = FailingFlushWriter {
            inner: stdout_mock.clone(),
            ok_flushes_left: ok_flush_count,
        };
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(writer)),
            is_mock: true,
        };
        (this, stdout_mock)
    }
}

struct FailingFlushWriter {
    inner: StdoutMock,
    ok_flushes_left: usize,
}

impl Write for FailingFlushWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.inner.write(buf) }

    fn flush(&mut self) -> io::Result<()> {
        if self.ok_flushes_left == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
        }
        self.ok_flushes_left -= 1;
        self.inner.flush()
    }
}
