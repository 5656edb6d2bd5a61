//! Response body module
//!
//! A body that is either in memory or streamed from an open file, so large
//! files are never read into memory whole.

use hyper::body::{Bytes, Frame, SizeHint};
use std::io::{Error, ErrorKind, Result};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::{AsyncRead, ReadBuf};

const READ_BUF_SIZE: usize = 64 * 1024;

/// Response body
#[derive(Debug)]
pub enum Body {
    Empty,
    Full(Bytes),
    File(FileBytesStream),
}

impl Body {
    /// Stream `len` bytes from `file`
    pub fn file(file: File, len: u64) -> Self {
        Self::File(FileBytesStream::new(file, len))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self::Full(Bytes::from(s))
    }
}

impl hyper::body::Body for Body {
    type Data = Bytes;
    type Error = Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>>>> {
        match self.get_mut() {
            Self::Empty => Poll::Ready(None),
            Self::Full(bytes) => {
                if bytes.is_empty() {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Ok(Frame::data(std::mem::take(bytes)))))
                }
            }
            Self::File(stream) => Pin::new(stream)
                .poll_next_chunk(cx)
                .map(|chunk| chunk.map(|r| r.map(Frame::data))),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Full(bytes) => bytes.is_empty(),
            Self::File(stream) => stream.remaining == 0,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            Self::Empty => SizeHint::with_exact(0),
            Self::Full(bytes) => SizeHint::with_exact(bytes.len() as u64),
            Self::File(stream) => SizeHint::with_exact(stream.remaining),
        }
    }
}

/// Reads a file in chunks until `remaining` bytes have been produced
pub struct FileBytesStream {
    file: File,
    buf: Box<[u8]>,
    remaining: u64,
}

impl std::fmt::Debug for FileBytesStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBytesStream")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl FileBytesStream {
    pub fn new(file: File, len: u64) -> Self {
        Self {
            file,
            buf: vec![0; READ_BUF_SIZE].into_boxed_slice(),
            remaining: len,
        }
    }

    /// Read the next chunk; `None` once `remaining` reaches zero.
    ///
    /// A file that ends early (truncated while being served) is an error
    /// rather than a short body, since the length was already announced.
    fn poll_next_chunk(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Bytes>>> {
        let Self {
            ref mut file,
            ref mut buf,
            ref mut remaining,
        } = *self;
        if *remaining == 0 {
            return Poll::Ready(None);
        }

        let buf_len = usize::try_from(*remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let mut read_buf = ReadBuf::new(&mut buf[..buf_len]);
        match Pin::new(file).poll_read(cx, &mut read_buf) {
            Poll::Ready(Ok(())) => {
                let filled = read_buf.filled();
                if filled.is_empty() {
                    return Poll::Ready(Some(Err(Error::new(
                        ErrorKind::UnexpectedEof,
                        "file ended before its announced length",
                    ))));
                }
                *remaining -= filled.len() as u64;
                Poll::Ready(Some(Ok(Bytes::copy_from_slice(filled))))
            }
            Poll::Ready(Err(e)) => Poll::Ready(Some(Err(e))),
            Poll::Pending => Poll::Pending,
        }
    }
}
