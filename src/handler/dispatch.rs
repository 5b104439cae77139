//! Frame dispatch.
//!
//! [`process`] validates a complete frame and routes it to the matching
//! [`FrameHandler`] entry point: method frames by class id, content frames
//! and heartbeats by frame type. Handlers receive the cursor positioned on
//! the method arguments, so decoding stays with the handler.

use crate::error::{CodecError, Result};
use crate::protocol::{FrameType, ReceivedFrame};

/// Method class ids.
pub mod class_id {
    pub const CONNECTION: u16 = 10;
    pub const CHANNEL: u16 = 20;
    pub const EXCHANGE: u16 = 40;
    pub const QUEUE: u16 = 50;
    pub const BASIC: u16 = 60;
    pub const TX: u16 = 90;
}

/// Class and method id at the start of a method frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId {
    pub class_id: u16,
    pub method_id: u16,
}

impl MethodId {
    pub const fn new(class_id: u16, method_id: u16) -> Self {
        Self {
            class_id,
            method_id,
        }
    }

    /// Read both ids from a cursor positioned on the payload.
    pub fn decode(frame: &mut ReceivedFrame<'_>) -> Result<Self> {
        let class_id = frame.next_u16()?;
        let method_id = frame.next_u16()?;
        Ok(Self::new(class_id, method_id))
    }

    fn not_found(self) -> CodecError {
        CodecError::HandlerNotFound {
            class_id: self.class_id,
            method_id: self.method_id,
        }
    }
}

/// Receiver of dispatched frames.
///
/// Every method entry point gets the channel, the method id and a cursor
/// positioned on the first argument. Unimplemented entry points reject the
/// frame with `HandlerNotFound`; heartbeats are accepted by default.
pub trait FrameHandler {
    fn connection(
        &mut self,
        _channel: u16,
        method: MethodId,
        _arguments: &mut ReceivedFrame<'_>,
    ) -> Result<()> {
        Err(method.not_found())
    }

    fn channel(
        &mut self,
        _channel: u16,
        method: MethodId,
        _arguments: &mut ReceivedFrame<'_>,
    ) -> Result<()> {
        Err(method.not_found())
    }

    fn exchange(
        &mut self,
        _channel: u16,
        method: MethodId,
        _arguments: &mut ReceivedFrame<'_>,
    ) -> Result<()> {
        Err(method.not_found())
    }

    fn queue(
        &mut self,
        _channel: u16,
        method: MethodId,
        _arguments: &mut ReceivedFrame<'_>,
    ) -> Result<()> {
        Err(method.not_found())
    }

    fn basic(
        &mut self,
        _channel: u16,
        method: MethodId,
        _arguments: &mut ReceivedFrame<'_>,
    ) -> Result<()> {
        Err(method.not_found())
    }

    fn transaction(
        &mut self,
        _channel: u16,
        method: MethodId,
        _arguments: &mut ReceivedFrame<'_>,
    ) -> Result<()> {
        Err(method.not_found())
    }

    /// Content header frame; the cursor is positioned on its payload.
    fn content_header(&mut self, channel: u16, _header: &mut ReceivedFrame<'_>) -> Result<()> {
        Err(CodecError::Protocol(format!(
            "unexpected content header on channel {}",
            channel
        )))
    }

    /// Content body frame.
    fn content_body(&mut self, channel: u16, _body: &[u8]) -> Result<()> {
        Err(CodecError::Protocol(format!(
            "unexpected content body on channel {}",
            channel
        )))
    }

    fn heartbeat(&mut self, _channel: u16) -> Result<()> {
        Ok(())
    }
}

/// Validate a complete frame and hand it to `handler`.
///
/// # Errors
///
/// - `IncompleteFrame` if envelope, payload or terminator are missing
/// - `InvalidFrameEnd` if the terminator is not `0xCE`
/// - `UnknownFrameType` for an unassigned frame type
/// - `HandlerNotFound` for an unknown class or a rejecting handler
/// - any error the handler returns
pub fn process<H: FrameHandler + ?Sized>(
    frame: &mut ReceivedFrame<'_>,
    handler: &mut H,
) -> Result<()> {
    frame.validate(0)?;

    let channel = frame.channel();
    match FrameType::from_u8(frame.frame_type())? {
        FrameType::Method => {
            let method = MethodId::decode(frame)?;
            tracing::trace!(
                "Method {}.{} on channel {}",
                method.class_id,
                method.method_id,
                channel
            );
            match method.class_id {
                class_id::CONNECTION => handler.connection(channel, method, frame),
                class_id::CHANNEL => handler.channel(channel, method, frame),
                class_id::EXCHANGE => handler.exchange(channel, method, frame),
                class_id::QUEUE => handler.queue(channel, method, frame),
                class_id::BASIC => handler.basic(channel, method, frame),
                class_id::TX => handler.transaction(channel, method, frame),
                _ => {
                    tracing::debug!(
                        "No handler for class {} on channel {}",
                        method.class_id,
                        channel
                    );
                    Err(method.not_found())
                }
            }
        }
        FrameType::Header => handler.content_header(channel, frame),
        FrameType::Body => {
            let body = frame.next_data(frame.remaining())?;
            handler.content_body(channel, body)
        }
        FrameType::Heartbeat => handler.heartbeat(channel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, LongString, ShortString, WireField};
    use crate::protocol::{build_frame, frame_type, Frame};

    #[derive(Default)]
    struct Recorder {
        methods: Vec<(u16, MethodId)>,
        queue_names: Vec<String>,
        bodies: Vec<Vec<u8>>,
        heartbeats: usize,
    }

    impl FrameHandler for Recorder {
        fn connection(
            &mut self,
            channel: u16,
            method: MethodId,
            _arguments: &mut ReceivedFrame<'_>,
        ) -> Result<()> {
            self.methods.push((channel, method));
            Ok(())
        }

        fn queue(
            &mut self,
            channel: u16,
            method: MethodId,
            arguments: &mut ReceivedFrame<'_>,
        ) -> Result<()> {
            self.methods.push((channel, method));
            arguments.next_u16()?;
            let name = ShortString::decode(arguments)?;
            self.queue_names.push(name.as_str().unwrap_or_default().to_string());
            Ok(())
        }

        fn content_body(&mut self, _channel: u16, body: &[u8]) -> Result<()> {
            self.bodies.push(body.to_vec());
            Ok(())
        }

        fn heartbeat(&mut self, _channel: u16) -> Result<()> {
            self.heartbeats += 1;
            Ok(())
        }
    }

    #[test]
    fn test_routes_by_class() {
        let frame = Frame::method(0, class_id::CONNECTION, 11, &[]).unwrap();
        let mut handler = Recorder::default();

        process(&mut frame.reader(), &mut handler).unwrap();

        assert_eq!(handler.methods, vec![(0, MethodId::new(10, 11))]);
    }

    #[test]
    fn test_handler_reads_arguments() {
        let arguments = [
            Field::from(0u16),
            Field::from(ShortString::new("tasks").unwrap()),
        ];
        let frame = Frame::method(3, class_id::QUEUE, 10, &arguments).unwrap();
        let mut handler = Recorder::default();

        process(&mut frame.reader(), &mut handler).unwrap();

        assert_eq!(handler.methods, vec![(3, MethodId::new(50, 10))]);
        assert_eq!(handler.queue_names, vec!["tasks".to_string()]);
    }

    #[test]
    fn test_unimplemented_class_rejected() {
        let frame = Frame::method(1, class_id::BASIC, 40, &[]).unwrap();
        let mut handler = Recorder::default();

        let err = process(&mut frame.reader(), &mut handler).unwrap_err();
        assert!(matches!(
            err,
            CodecError::HandlerNotFound {
                class_id: 60,
                method_id: 40
            }
        ));
    }

    #[test]
    fn test_unknown_class_rejected() {
        let frame = Frame::method(1, 99, 1, &[]).unwrap();
        let mut handler = Recorder::default();

        assert!(matches!(
            process(&mut frame.reader(), &mut handler),
            Err(CodecError::HandlerNotFound { class_id: 99, .. })
        ));
    }

    #[test]
    fn test_body_and_heartbeat() {
        let body = Frame::new(frame_type::BODY, 1, b"payload").unwrap();
        let mut handler = Recorder::default();

        process(&mut body.reader(), &mut handler).unwrap();
        process(&mut Frame::heartbeat().reader(), &mut handler).unwrap();

        assert_eq!(handler.bodies, vec![b"payload".to_vec()]);
        assert_eq!(handler.heartbeats, 1);
    }

    #[test]
    fn test_incomplete_frame_rejected() {
        let bytes = build_frame(frame_type::METHOD, 0, &[0, 10, 0, 11]);
        let mut reader = ReceivedFrame::new(&bytes[..bytes.len() - 1]);

        let err = process(&mut reader, &mut Recorder::default()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::IncompleteFrame {
                needed: 12,
                available: 11
            }
        ));
    }

    #[test]
    fn test_bad_terminator_rejected() {
        let mut bytes = build_frame(frame_type::METHOD, 0, &[0, 10, 0, 11]);
        let last = bytes.len() - 1;
        bytes[last] = 0x00;

        let err = process(&mut ReceivedFrame::new(&bytes), &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidFrameEnd(0x00)));
    }

    #[test]
    fn test_unknown_frame_type_rejected() {
        let bytes = build_frame(7, 0, b"");
        let err = process(&mut ReceivedFrame::new(&bytes), &mut Recorder::default()).unwrap_err();
        assert!(matches!(err, CodecError::UnknownFrameType(7)));
    }

    #[test]
    fn test_default_handler_rejects_content_header() {
        struct Nothing;
        impl FrameHandler for Nothing {}

        let frame = Frame::new(frame_type::HEADER, 1, &[0, 60, 0, 0]).unwrap();
        assert!(matches!(
            process(&mut frame.reader(), &mut Nothing),
            Err(CodecError::Protocol(_))
        ));
        assert!(process(&mut Frame::heartbeat().reader(), &mut Nothing).is_ok());
    }

    #[test]
    fn test_connection_start_ok_response() {
        let response = crate::login::Login::default().response().unwrap();
        let arguments = [Field::from(response.clone())];
        let frame = Frame::method(0, class_id::CONNECTION, 11, &arguments).unwrap();

        struct StartOk(Option<LongString>);
        impl FrameHandler for StartOk {
            fn connection(
                &mut self,
                _channel: u16,
                _method: MethodId,
                arguments: &mut ReceivedFrame<'_>,
            ) -> Result<()> {
                self.0 = Some(LongString::decode(arguments)?);
                Ok(())
            }
        }

        let mut handler = StartOk(None);
        process(&mut frame.reader(), &mut handler).unwrap();
        assert_eq!(handler.0, Some(response));
    }
}
