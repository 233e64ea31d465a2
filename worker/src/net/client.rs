use std::time::Duration;

use comms::protocol::{OCTET_STREAM, READ_PARAMS_PATH, WRITE_PARAMS_PATH};
use log::debug;
use ml_core::{Gradient, Variable};
use reqwest::{Client, Response, StatusCode, header::CONTENT_TYPE};
use url::Url;

use super::{ClientErr, Result};

/// Parameter Server client wrapper.
///
/// Contract:
/// - `GET <base>/read_params` answers the canonical vectors in order.
/// - `POST <base>/write_params` takes a gradient with one vector per
///   variable, in the same order.
#[derive(Debug, Clone)]
pub struct ParamClient {
    http: Client,
    read_url: Url,
    write_url: Url,
}

impl ParamClient {
    /// Creates a new `ParamClient` without a request timeout.
    ///
    /// # Arguments
    /// * `base_url` - The root under which the server exposes its resources.
    ///
    /// # Returns
    /// A new client or `ClientErr::InvalidUrl` if `base_url` can't be used.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a new `ParamClient` whose requests fail after `timeout`.
    ///
    /// # Arguments
    /// * `base_url` - The root under which the server exposes its resources.
    /// * `timeout` - The limit for a whole round trip.
    ///
    /// # Returns
    /// A new client or an error if `base_url` can't be used.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    fn with_client(base_url: &str, http: Client) -> Result<Self> {
        let base =
            Url::parse(base_url).map_err(|e| ClientErr::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http,
            read_url: endpoint(&base, READ_PARAMS_PATH)?,
            write_url: endpoint(&base, WRITE_PARAMS_PATH)?,
        })
    }

    /// Returns the url the parameters are read from.
    pub fn read_url(&self) -> &Url {
        &self.read_url
    }

    /// Returns the url the gradients are written to.
    pub fn write_url(&self) -> &Url {
        &self.write_url
    }

    /// Fetches the canonical parameters and copies them into `vars`.
    ///
    /// Every vector is checked before any variable is written, so `vars` are
    /// either fully updated or left untouched.
    ///
    /// # Arguments
    /// * `vars` - The local variables, in the server's order.
    ///
    /// # Returns
    /// An error if the round trip fails or the shapes disagree.
    pub async fn read_params(&self, vars: &[Variable]) -> Result<()> {
        let res = self.http.get(self.read_url.clone()).send().await?;
        let body = check_status(res).await?.bytes().await?;
        let vecs = comms::decode_vectors(&body)?;

        if vecs.len() != vars.len() {
            return Err(ClientErr::IncompatibleDimensions {
                what: "vector count".to_string(),
                got: vecs.len(),
                expected: vars.len(),
            });
        }

        for (var, values) in vars.iter().zip(&vecs) {
            var.check_len(values.len())?;
        }

        for (var, values) in vars.iter().zip(&vecs) {
            var.copy_from(values)?;
        }

        debug!(bytes = body.len(); "read parameters");
        Ok(())
    }

    /// Sends the entries of `grad` for `vars`, in order, to the server.
    ///
    /// # Arguments
    /// * `grad` - The gradient, it must cover every variable in `vars`.
    /// * `vars` - The variables to send, in the server's order.
    ///
    /// # Returns
    /// `ClientErr::MissingGradient` before any request is made if `grad`
    /// lacks a variable, otherwise an error if the round trip fails or the
    /// server rejects the gradient.
    pub async fn write_params(&self, grad: &Gradient, vars: &[Variable]) -> Result<()> {
        let vecs = vars
            .iter()
            .map(|var| {
                grad.get(var).ok_or_else(|| ClientErr::MissingGradient {
                    name: var.name().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let payload = comms::encode_vectors(&vecs);
        let len = payload.len();

        let res = self
            .http
            .post(self.write_url.clone())
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(payload)
            .send()
            .await?;

        check_status(res).await?;
        debug!(bytes = len; "wrote gradient");
        Ok(())
    }
}

/// Appends the segments of `path` to the path of `base`.
fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();

    url.path_segments_mut()
        .map_err(|()| ClientErr::InvalidUrl(format!("{base} can't carry a path")))?
        .pop_if_empty()
        .extend(path.trim_start_matches('/').split('/'));

    Ok(url)
}

/// Turns a non success response into `ClientErr::RemoteRejected`.
async fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status == StatusCode::OK {
        return Ok(res);
    }

    let message = res.text().await?;
    Err(ClientErr::RemoteRejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_extend_the_base_path() {
        let client = ParamClient::new("http://127.0.0.1:8765").unwrap();
        assert_eq!(client.read_url().as_str(), "http://127.0.0.1:8765/read_params");
        assert_eq!(client.write_url().as_str(), "http://127.0.0.1:8765/write_params");

        let client = ParamClient::new("http://localhost/ps/").unwrap();
        assert_eq!(client.read_url().as_str(), "http://localhost/ps/read_params");

        let client = ParamClient::new("http://localhost/ps").unwrap();
        assert_eq!(client.write_url().as_str(), "http://localhost/ps/write_params");
    }

    #[test]
    fn unusable_base_urls_are_rejected() {
        assert!(matches!(
            ParamClient::new("not a url"),
            Err(ClientErr::InvalidUrl(_))
        ));
        assert!(matches!(
            ParamClient::new("mailto:ps@example.com"),
            Err(ClientErr::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn missing_gradient_fails_before_any_request() {
        // TEST-NET-1, any connection attempt would hang until the timeout.
        let client =
            ParamClient::with_timeout("http://192.0.2.1:9", Duration::from_secs(30)).unwrap();

        let w = Variable::zeros("w", 2);
        let b = Variable::zeros("b", 1);
        let grad: Gradient = [(w.clone(), vec![1., 1.])].into_iter().collect();

        let res = tokio::time::timeout(Duration::from_secs(1), client.write_params(&grad, &[w, b]))
            .await
            .expect("write_params reached the network");

        match res {
            Err(ClientErr::MissingGradient { name }) => assert_eq!(name, "b"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
