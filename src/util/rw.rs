use std::{cell::RefCell, fmt::Write, io, path::PathBuf, rc::Rc};

#[derive(Default)]
pub struct StringBuffer {
    s: String,
}

impl StringBuffer {
    pub fn new() -> StringBuffer {
        StringBuffer { s: String::new() }
    }

    pub fn as_str(&self) -> &str {
        self.s.as_str()
    }

    pub fn clear(&mut self) {
        self.s.clear();
    }
}

// String only implements fmt::Write
impl io::Write for StringBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let str_rep = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.s
            .write_str(str_rep)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// A shared stream writer, cheap to clone.
//
// Mostly used to collect warnings and errors meant for the user, so they
// can go to stderr from the CLI, or be captured into a buffer by tests.
#[derive(Clone)]
pub struct WriteHandle {
    w: Rc<RefCell<dyn io::Write>>,
}

impl WriteHandle {
    pub fn stdout_write_handle() -> WriteHandle {
        WriteHandle { w: Rc::new(RefCell::new(io::stdout())) }
    }

    pub fn stderr_write_handle() -> WriteHandle {
        WriteHandle { w: Rc::new(RefCell::new(io::stderr())) }
    }

    pub fn string_buff_write_handle() -> (WriteHandle, Rc<RefCell<StringBuffer>>) {
        let buffer = Rc::new(RefCell::new(StringBuffer::new()));
        let h = WriteHandle { w: buffer.clone() };
        (h, buffer)
    }

    pub fn empty_write_handle() -> WriteHandle {
        WriteHandle { w: Rc::new(RefCell::new(io::empty())) }
    }
}

impl io::Write for WriteHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // The test framework cannot capture direct writes to stdout or
        // stderr, so mirror everything into the trace.
        tracing::trace!("WriteHandle::write {}", String::from_utf8_lossy(buf));
        self.w.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.borrow_mut().flush()
    }
}

// An input (usually a CSV file) along with a name to describe it
// in error messages. It may be pre-read, in which case we just hold
// the string.
pub enum DescribedReader {
    String((String, String)),
    FilePath(PathBuf),
}

impl DescribedReader {
    pub fn from_string(desc: String, data: String) -> DescribedReader {
        DescribedReader::String((desc, data))
    }

    pub fn from_file_path(path: PathBuf) -> DescribedReader {
        DescribedReader::FilePath(path)
    }

    pub fn desc(&self) -> &str {
        match self {
            DescribedReader::String((name, _)) => name,
            DescribedReader::FilePath(path) => {
                path.to_str().unwrap_or("<unknown path>")
            }
        }
    }

    pub fn reader<'a>(&'a self) -> Result<Box<dyn io::Read + 'a>, io::Error> {
        match self {
            DescribedReader::String((_, text)) => Ok(Box::new(text.as_bytes())),
            DescribedReader::FilePath(path) => {
                Ok(Box::new(std::fs::File::open(path)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::{DescribedReader, StringBuffer, WriteHandle};

    #[test]
    fn test_string_buffer() {
        let mut buff = StringBuffer::new();
        let _ = write!(buff, "Some {}", "text");
        let _ = writeln!(buff, " 1");
        assert_eq!(buff.as_str(), "Some text 1\n");
        buff.clear();
        assert_eq!(buff.as_str(), "");
    }

    #[test]
    fn test_write_handle() {
        let (mut handle, buff) = WriteHandle::string_buff_write_handle();
        let mut handle2 = handle.clone();
        let _ = write!(handle, "Some {}", "text");
        let _ = writeln!(handle2, " 1");
        assert_eq!(buff.borrow().as_str(), "Some text 1\n");
    }

    #[test]
    fn test_described_reader() {
        let r = DescribedReader::from_string(
            "trips.csv".to_string(), "a,b\n1,2".to_string());
        assert_eq!(r.desc(), "trips.csv");
        let mut s = String::new();
        r.reader().unwrap().read_to_string(&mut s).unwrap();
        assert_eq!(s, "a,b\n1,2");

        let missing = DescribedReader::from_file_path("/no/such/ifta.csv".into());
        assert_eq!(missing.desc(), "/no/such/ifta.csv");
        assert!(missing.reader().is_err());
    }
}
