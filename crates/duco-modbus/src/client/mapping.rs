// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Mapping from `tokio-modbus` results to [`ModbusError`].

use std::io;
use std::time::Duration;

use tokio_modbus::ExceptionCode;

use crate::error::{ConnectionError, ModbusError, ModbusResult, ProtocolError, TimeoutError};

/// Function code for Read Holding Registers.
pub(crate) const FC_READ_HOLDING: u8 = 0x03;
/// Function code for Read Input Registers.
pub(crate) const FC_READ_INPUT: u8 = 0x04;
/// Function code for Write Single Register.
pub(crate) const FC_WRITE_SINGLE: u8 = 0x06;

/// Flattens the nested `tokio-modbus` result.
pub(crate) fn map_response<T>(
    result: tokio_modbus::Result<T>,
    function_code: u8,
    timeout: Duration,
) -> ModbusResult<T> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(exception)) => Err(ModbusError::exception(
            function_code,
            exception_code_to_u8(&exception),
        )),
        Err(tokio_modbus::Error::Transport(e)) => Err(map_io_error(e, timeout)),
        Err(e) => Err(ModbusError::protocol(ProtocolError::unexpected(e.to_string()))),
    }
}

/// Maps an I/O error from the transport.
pub(crate) fn map_io_error(error: io::Error, timeout: Duration) -> ModbusError {
    use io::ErrorKind;

    match error.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => {
            ModbusError::timeout(TimeoutError::response(timeout))
        }
        ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe
        | ErrorKind::UnexpectedEof => {
            ModbusError::connection(ConnectionError::closed(Some(error.to_string())))
        }
        ErrorKind::NotConnected => ModbusError::not_connected(),
        _ => ModbusError::connection(ConnectionError::io("transport error", error)),
    }
}

/// Returns `true` if the error means the connection is gone.
pub(crate) fn is_connection_lost(error: &ModbusError) -> bool {
    matches!(
        error,
        ModbusError::Connection(ConnectionError::Closed { .. } | ConnectionError::NotConnected)
    )
}

fn exception_code_to_u8(code: &ExceptionCode) -> u8 {
    match code {
        ExceptionCode::IllegalFunction => 0x01,
        ExceptionCode::IllegalDataAddress => 0x02,
        ExceptionCode::IllegalDataValue => 0x03,
        ExceptionCode::ServerDeviceFailure => 0x04,
        ExceptionCode::Acknowledge => 0x05,
        ExceptionCode::ServerDeviceBusy => 0x06,
        ExceptionCode::MemoryParityError => 0x08,
        ExceptionCode::GatewayPathUnavailable => 0x0A,
        ExceptionCode::GatewayTargetDevice => 0x0B,
        _ => 0xFF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_exception() {
        let result: tokio_modbus::Result<Vec<u16>> = Ok(Err(ExceptionCode::IllegalDataAddress));
        let error = map_response(result, FC_READ_INPUT, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(
            error,
            ModbusError::Protocol(ProtocolError::ExceptionResponse {
                function_code: 0x04,
                exception_code: 0x02,
                ..
            })
        ));
    }

    #[test]
    fn test_map_io_error() {
        let timeout = Duration::from_millis(500);
        let error = map_io_error(io::Error::new(io::ErrorKind::TimedOut, "slow"), timeout);
        assert!(matches!(error, ModbusError::Timeout(_)));

        let error = map_io_error(io::Error::new(io::ErrorKind::BrokenPipe, "gone"), timeout);
        assert!(is_connection_lost(&error));
        assert!(error.is_transport_failure());
    }
}
