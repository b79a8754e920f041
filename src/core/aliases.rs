use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Built-in canonical field names and the spellings accepted for each.
///
/// Partner profile keys are bare; account keys carry the `auth.` prefix and are
/// aliased including it. Every canonical key also resolves to itself.
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    // Identity
    (
        "name",
        &[
            "nom",
            "raison sociale",
            "raison_sociale",
            "company",
            "company name",
            "societe",
            "société",
            "partner name",
        ],
    ),
    ("code", &["ref", "reference", "référence", "partner code", "code client"]),
    ("partner_type", &["type", "type partenaire", "partner type", "kind"]),
    ("legal_form", &["forme juridique", "legal form", "statut juridique"]),
    ("category", &["categorie", "catégorie", "segment", "partner category"]),
    ("status", &["statut", "etat", "état", "state code"]),
    (
        "parent_partner_id",
        &["parent", "parent id", "parent partner", "societe mere", "société mère"],
    ),
    // Contact
    ("email", &["mail", "e-mail", "courriel", "adresse email"]),
    ("phone", &["tel", "tél", "telephone", "téléphone", "fixe", "phone number"]),
    ("mobile", &["gsm", "portable", "cell", "cellphone", "mobile phone"]),
    ("fax", &["telecopie", "télécopie", "fax number"]),
    ("website", &["site", "site web", "web", "url", "site internet"]),
    ("contact_name", &["contact", "interlocuteur", "contact person", "personne contact"]),
    // Address
    ("street", &["address", "adresse", "rue", "street1", "address line 1"]),
    ("street2", &["address2", "adresse2", "complement adresse", "complément adresse", "address line 2"]),
    ("city", &["ville", "town", "localite", "localité"]),
    ("zip", &["postal code", "code postal", "cp", "zipcode", "zip code"]),
    ("state", &["province", "prefecture", "préfecture"]),
    ("region", &["région", "area"]),
    ("country", &["pays", "country code", "code pays"]),
    ("geo_lat", &["latitude", "lat", "gps lat"]),
    ("geo_lng", &["longitude", "lng", "lon", "long", "gps lng"]),
    // Commercial
    (
        "credit_limit",
        &["plafond", "plafond credit", "plafond crédit", "limite credit", "limite crédit", "encours max", "credit"],
    ),
    ("price_list_id", &["pricelist", "price list", "liste prix", "liste de prix", "tarif"]),
    (
        "payment_term_id",
        &["payment terms", "payment term", "conditions paiement", "delai paiement", "délai paiement"],
    ),
    ("discount_rate", &["remise", "taux remise", "remise pct", "discount", "discount percent"]),
    ("max_discount_rate", &["remise max", "taux remise max", "max discount"]),
    ("discount_amount", &["montant remise", "remise montant", "discount value"]),
    ("max_discount_amount", &["remise max montant", "montant remise max", "max discount value"]),
    ("min_order_amount", &["minimum commande", "commande min", "min order", "minimum order"]),
    ("risk_score", &["score risque", "risque", "risk", "score"]),
    (
        "salesperson_id",
        &["commercial", "vendeur", "salesperson", "sales rep", "representant", "représentant"],
    ),
    ("currency", &["devise", "monnaie"]),
    (
        "allow_show_on_pos",
        &["show on pos", "visible pos", "afficher pos", "afficher caisse", "pos visible"],
    ),
    // Fiscal
    ("ice", &["identifiant commun", "identifiant commun entreprise", "ice number"]),
    ("rc", &["registre commerce", "registre de commerce", "trade register"]),
    ("if_number", &["if", "identifiant fiscal", "tax id", "tax number"]),
    ("patente", &["taxe professionnelle", "business tax"]),
    ("cnss", &["numero cnss", "numéro cnss", "social security"]),
    ("tax_exempt", &["exonere", "exonéré", "exoneration tva", "exonération tva", "tax free"]),
    // Delivery
    ("delivery_address", &["adresse livraison", "adresse de livraison", "shipping address"]),
    ("delivery_zone", &["zone livraison", "zone de livraison", "zone", "shipping zone"]),
    (
        "delivery_instructions",
        &["instructions livraison", "delivery notes", "consignes livraison", "shipping notes"],
    ),
    ("delivery_contact", &["contact livraison", "shipping contact"]),
    // Misc
    ("notes", &["note", "remarques", "commentaire", "comments"]),
    ("language", &["langue", "lang", "locale"]),
    ("tags", &["etiquettes", "étiquettes", "labels"]),
    // Account
    ("auth.name", &["auth_name", "auth.nom", "auth_nom", "auth.full_name"]),
    ("auth.email", &["auth_email", "auth.mail", "auth.courriel", "auth.login_email"]),
    ("auth.phone", &["auth_phone", "auth.tel", "auth.telephone", "auth.téléphone"]),
    ("auth.username", &["auth_username", "auth.login", "auth.identifiant", "auth.user"]),
    ("auth.password", &["auth_password", "auth.mot_de_passe", "auth.mdp", "auth.pass"]),
    ("auth.role", &["auth_role", "auth.rôle", "auth.profile", "auth.profil"]),
    ("auth.is_active", &["auth_is_active", "auth.active", "auth.actif", "auth.enabled"]),
];

static BUILTIN: LazyLock<AliasTable> = LazyLock::new(|| {
    AliasTable::from_entries(
        BUILTIN_ALIASES
            .iter()
            .map(|(canonical, aliases)| (*canonical, aliases.iter().copied())),
    )
});

/// Normalizes a field spelling for alias lookup.
///
/// Lowercases, then collapses every run of whitespace, hyphens and underscores
/// into a single `_`. Idempotent.
///
/// # Example
///
/// ```
/// use partner_file::normalize;
///
/// assert_eq!(normalize("Raison  Sociale"), "raison_sociale");
/// assert_eq!(normalize("e-mail"), "e_mail");
/// assert_eq!(normalize(&normalize("Code - Postal")), normalize("Code - Postal"));
/// ```
pub fn normalize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_separator = false;

    for c in key.chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            if !in_separator {
                out.push('_');
                in_separator = true;
            }
        } else {
            in_separator = false;
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Immutable mapping from accepted spellings to canonical field names.
///
/// The reverse index is built once at construction. Use [`AliasTable::builtin`]
/// for the shared process-wide table, or [`AliasTable::with_extra`] to derive an
/// owned table carrying additional spellings.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: BTreeMap<String, Vec<String>>,
    index: HashMap<String, String>,
}

impl AliasTable {
    /// Returns the built-in table, built on first use.
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    /// Builds a table from `(canonical, aliases)` pairs.
    ///
    /// If two canonical keys claim the same normalized alias, the later entry
    /// wins and a warning is logged.
    pub fn from_entries<I, K, A, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (canonical, aliases) in entries {
            let list = map.entry(canonical.into()).or_default();
            for alias in aliases {
                let alias = alias.into();
                if !list.contains(&alias) {
                    list.push(alias);
                }
            }
        }
        Self::build(map)
    }

    fn build(entries: BTreeMap<String, Vec<String>>) -> Self {
        let mut index = HashMap::new();

        for (canonical, aliases) in &entries {
            for spelling in std::iter::once(canonical).chain(aliases.iter()) {
                let key = normalize(spelling);
                if let Some(previous) = index.insert(key.clone(), canonical.clone())
                    && previous != *canonical
                {
                    tracing::warn!(
                        alias = %key,
                        previous = %previous,
                        canonical = %canonical,
                        "alias claimed by two canonical keys; keeping the later one"
                    );
                }
            }
        }

        Self { entries, index }
    }

    /// Returns a new table with `extra` spellings merged in.
    ///
    /// Canonical keys not present in this table are added, which makes them
    /// recognized fields of the new table.
    pub fn with_extra(&self, extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut entries = self.entries.clone();
        for (canonical, aliases) in extra {
            let list = entries.entry(canonical.clone()).or_default();
            for alias in aliases {
                if !list.contains(alias) {
                    list.push(alias.clone());
                }
            }
        }
        Self::build(entries)
    }

    /// Resolves a spelling to its canonical key.
    ///
    /// Returns `None` for unknown spellings; never panics.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.index.get(&normalize(key)).map(String::as_str)
    }

    /// Whether `canonical` is one of this table's canonical keys.
    pub fn is_known(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    /// The declared aliases of a canonical key.
    pub fn aliases_of(&self, canonical: &str) -> Option<&[String]> {
        self.entries.get(canonical).map(Vec::as_slice)
    }

    /// Canonical keys in sorted order.
    pub fn canonical_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of canonical keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
