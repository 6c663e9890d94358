#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Record,
    Contract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One interface method as written: `Read(p []byte)` / `(n int, err error)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub signature: String,
    pub returns: String,
}

impl MethodSignature {
    pub fn name(&self) -> &str {
        let end = self.signature.find('(').unwrap_or(self.signature.len());
        self.signature[..end].trim()
    }

    /// Text between the outer parentheses of the signature.
    pub fn params(&self) -> &str {
        match (self.signature.find('('), self.signature.rfind(')')) {
            (Some(open), Some(close)) if close > open => &self.signature[open + 1..close],
            _ => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub name: String,
    pub methods: Vec<MethodSignature>,
}

/// Declarations found in one source file, in order of first appearance.
///
/// A name seen twice keeps its first position but takes the later body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    records: Vec<Record>,
    contracts: Vec<Contract>,
}

impl SourceFile {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn contract(&self, name: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.contracts.is_empty()
    }

    pub fn insert_record(&mut self, record: Record) {
        match self.records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn insert_contract(&mut self, contract: Contract) {
        match self.contracts.iter_mut().find(|c| c.name == contract.name) {
            Some(existing) => *existing = contract,
            None => self.contracts.push(contract),
        }
    }
}
