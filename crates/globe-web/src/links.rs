/// Side channel for "open this resource" requests coming out of a tick.
pub trait LinkOpener {
    fn open(&mut self, url: &str);
}

/// Opens links in a new browser tab via `window.open(url, "_blank")`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&mut self, url: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("no window available, cannot open {}", url);
            return;
        };
        match window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => log::info!("opened {}", url),
            Ok(None) => log::warn!("popup blocked for {}", url),
            Err(err) => log::warn!("window.open failed for {}: {:?}", url, err),
        }
    }
}

/// Collects requested links instead of opening them. Useful off-browser.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    pub opened: Vec<String>,
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}
