//! Single-use TCP listener that waits for the language server to dial back.
//!
//! The server is started with a port to connect to. [`ConnectionAwaiter`]
//! binds that port on all interfaces, IPv6 and IPv4 through one dual-stack
//! socket where the host allows it, accepts exactly one connection and
//! closes the listener before handing the stream over. There is no timeout;
//! callers wrap the future in their own if they need one.

use std::io;
use std::net::{self as std_net, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info};

use crate::errors::ConnectionError;

const CONNECTION_TARGET: &str = "jdtls_launch::connection";

const LISTEN_BACKLOG: i32 = 128;

/// Parses a base-10 port number, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`ConnectionError::InvalidPort`] for non-numeric or out-of-range
/// input.
pub fn parse_port(input: &str) -> Result<u16, ConnectionError> {
    input
        .trim()
        .parse::<u16>()
        .map_err(|source| ConnectionError::InvalidPort {
            input: input.to_owned(),
            source,
        })
}

/// A bound listener waiting for its single connection.
///
/// Dropping the awaiter, or calling [`Self::accept`], closes the listener.
#[derive(Debug)]
pub struct ConnectionAwaiter {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl ConnectionAwaiter {
    /// Binds a listener on `port` across all local interfaces.
    ///
    /// Prefers a dual-stack `[::]` socket so clients dialling either `::1`
    /// or `127.0.0.1` are accepted, and falls back to `0.0.0.0` when the
    /// host has no usable IPv6. Port `0` asks the OS for a free port; read it
    /// back through [`Self::local_addr`].
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Bind`] when the port cannot be bound.
    #[expect(
        clippy::unused_async,
        reason = "registering the listener needs a running tokio reactor"
    )]
    pub async fn bind(port: u16) -> Result<Self, ConnectionError> {
        let (addr, std_listener) = bind_all_interfaces(port)?;
        let listener = TcpListener::from_std(std_listener)
            .map_err(|source| ConnectionError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ConnectionError::LocalAddress { source })?;
        info!(
            target: CONNECTION_TARGET,
            port = local_addr.port(),
            "awaiting connection on port {}",
            local_addr.port()
        );
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address the listener is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits for the first inbound connection, then closes the listener.
    ///
    /// The listener is released whether accepting succeeds or fails. Further
    /// connection attempts are refused once this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Accept`] when the listener fails before a
    /// connection arrives.
    pub async fn accept(self) -> Result<ServerConnection, ConnectionError> {
        let Self {
            listener,
            local_addr,
        } = self;
        let port = local_addr.port();
        let accepted = listener.accept().await;
        drop(listener);

        let (stream, peer_addr) =
            accepted.map_err(|source| ConnectionError::Accept { port, source })?;
        info!(
            target: CONNECTION_TARGET,
            port,
            peer = %peer_addr,
            "connection established on port {port}"
        );
        Ok(ServerConnection {
            stream,
            peer_addr,
            port,
        })
    }
}

fn bind_all_interfaces(
    port: u16,
) -> Result<(SocketAddr, std_net::TcpListener), ConnectionError> {
    let dual_stack = SocketAddr::from((Ipv6Addr::UNSPECIFIED, port));
    match bind_socket(dual_stack) {
        Ok(listener) => Ok((dual_stack, listener)),
        Err(source) if source.kind() == io::ErrorKind::AddrInUse => {
            Err(ConnectionError::Bind {
                addr: dual_stack,
                source,
            })
        }
        Err(error) => {
            debug!(
                target: CONNECTION_TARGET,
                port,
                error = %error,
                "dual-stack bind unavailable, falling back to IPv4"
            );
            let ipv4 = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
            bind_socket(ipv4)
                .map(|listener| (ipv4, listener))
                .map_err(|source| ConnectionError::Bind { addr: ipv4, source })
        }
    }
}

fn bind_socket(addr: SocketAddr) -> io::Result<std_net::TcpListener> {
    let socket = Socket::new(
        Domain::for_address(addr),
        Type::STREAM,
        Some(Protocol::TCP),
    )?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    #[cfg(unix)]
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}

/// Binds `port` and resolves once the language server connects.
///
/// # Errors
///
/// Returns [`ConnectionError::Bind`] if the listener cannot start and
/// [`ConnectionError::Accept`] if it fails before a connection arrives.
pub async fn await_server_connection(port: u16) -> Result<ServerConnection, ConnectionError> {
    ConnectionAwaiter::bind(port).await?.accept().await
}

/// Like [`await_server_connection`], parsing the port from text first.
///
/// # Errors
///
/// Returns [`ConnectionError::InvalidPort`] for unparsable input, otherwise
/// the errors of [`await_server_connection`].
pub async fn await_server_connection_str(
    port: &str,
) -> Result<ServerConnection, ConnectionError> {
    await_server_connection(parse_port(port)?).await
}

/// The accepted duplex stream to the language server.
///
/// Reads and writes go to the same socket. Use [`Self::into_split`] when the
/// reader and writer must live in different tasks.
#[derive(Debug)]
pub struct ServerConnection {
    stream: TcpStream,
    peer_addr: SocketAddr,
    port: u16,
}

impl ServerConnection {
    /// Address of the connected server process.
    #[must_use]
    pub const fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Local port the connection arrived on.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Splits into reader and writer halves of the same socket.
    #[must_use]
    pub fn into_split(self) -> (OwnedReadHalf, OwnedWriteHalf) {
        self.stream.into_split()
    }

    /// Returns the underlying TCP stream.
    #[must_use]
    pub fn into_inner(self) -> TcpStream {
        self.stream
    }
}

impl AsyncRead for ServerConnection {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_read(cx, buf)
    }
}

impl AsyncWrite for ServerConnection {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().stream).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_shutdown(cx)
    }
}
