//! Static reference catalogs for Sri Lankan administrative divisions.
//!
//! Names are canonical keys: downstream map rendering and backend filtering
//! compare them with exact string equality, so entries must not be
//! normalised or corrected here. Gaps between the catalogs are reported by
//! [`audit`] rather than filled in.

use super::types::{BoundingBoxZone, Coordinates, District, DivisionalSecretariat};
use serde::Serialize;

/// Returned by bounding-box resolution when no zone contains the point.
pub const FALLBACK_DISTRICT: &str = "Colombo";
pub const FALLBACK_DIVISIONAL_SECRETARIAT: &str = "Colombo";

// ─── District coordinates ───────────────────────────────────────

/// Representative (main town) coordinate per district.
const DISTRICT_COORDINATES: &[(&str, f64, f64)] = &[
    // Western Province
    ("Colombo", 6.9271, 79.8612),
    ("Gampaha", 7.0873, 80.0142),
    ("Kalutara", 6.5854, 79.9607),

    // Central Province
    ("Kandy", 7.2906, 80.6337),
    ("Matale", 7.4675, 80.6234),
    ("Nuwara Eliya", 6.9497, 80.7891),

    // Southern Province
    ("Galle", 6.0535, 80.2210),
    ("Matara", 5.9549, 80.5550),
    ("Hambantota", 6.1241, 81.1185),

    // Northern Province
    ("Jaffna", 9.6615, 80.0255),
    ("Kilinochchi", 9.3900, 80.4036),
    ("Mannar", 8.9814, 79.9072),
    ("Vavuniya", 8.7514, 80.4971),
    ("Mullaitivu", 9.2667, 80.8142),

    // Eastern Province
    ("Batticaloa", 7.7102, 81.7088),
    ("Ampara", 7.2906, 81.6656),
    ("Trincomalee", 8.5874, 81.2152),

    // North Western Province
    ("Kurunegala", 7.4818, 80.3609),
    ("Puttalam", 8.0362, 79.8283),

    // North Central Province
    ("Anuradhapura", 8.3114, 80.4037),
    ("Polonnaruwa", 7.9403, 81.0188),

    // Uva Province
    ("Badulla", 6.9934, 81.0550),
    ("Monaragala", 6.8731, 81.3506),

    // Sabaragamuwa Province
    ("Ratnapura", 6.6828, 80.3992),
    ("Kegalle", 7.2513, 80.3464),

    // Divisional Secretariat coordinates
];

// ─── Divisional secretariat coordinates ─────────────────────────

/// Representative coordinate per divisional secretariat, keyed by flat name.
/// Some names here have no owning district (and many listed divisions have
/// no coordinate); see [`audit`].
const DS_COORDINATES: &[(&str, f64, f64)] = &[
    // Western Province - Colombo
    ("Colombo", 6.9271, 79.8612),
    ("Dehiwala-Mount Lavinia", 6.8435, 79.8730),
    ("Moratuwa", 6.7730, 79.8816),
    ("Sri Jayawardenepura Kotte", 6.8893, 79.9195),
    ("Kaduwela", 6.9330, 79.9845),
    ("Kolonnawa", 6.9330, 79.8847),
    ("Maharagama", 6.8480, 79.9265),
    ("Kesbewa", 6.8118, 79.9265),
    ("Homagama", 6.8444, 80.0022),
    ("Padukka", 6.8500, 80.0900),
    ("Hanwella", 6.9080, 80.0870),
    ("Seethawaka", 6.8250, 80.1500),
    ("Avissawella", 6.9515, 80.2097),

    // Western Province - Gampaha
    ("Gampaha", 7.0873, 80.0142),
    ("Negombo", 7.2084, 79.8358),
    ("Katana", 7.1167, 79.8500),
    ("Divulapitiya", 7.2167, 80.0000),
    ("Mirigama", 7.2417, 80.1167),
    ("Minuwangoda", 7.1667, 79.9833),
    ("Attanagalla", 7.1083, 80.1500),
    ("Ja-Ela", 7.0750, 79.8917),
    ("Mahara", 7.0000, 79.9333),
    ("Dompe", 7.1000, 80.0833),
    ("Biyagama", 6.9500, 79.9667),
    ("Kelaniya", 6.9556, 79.9219),

    // Western Province - Kalutara
    ("Kalutara", 6.5854, 79.9607),
    ("Beruwala", 6.4790, 79.9830),
    ("Panadura", 6.7133, 79.9026),
    ("Horana", 6.7158, 80.0628),
    ("Ingiriya", 6.7833, 80.1000),
    ("Bulathsinhala", 6.7167, 80.1833),
    ("Mathugama", 6.5250, 80.1250),
    ("Agalawatta", 6.6333, 80.0833),
    ("Palindanuwara", 6.5500, 80.2500),
    ("Madurawela", 6.6000, 80.2000),
    ("Millaniya", 6.4500, 80.2000),
    ("Bandaragama", 6.7333, 79.9833),
    ("Dodangoda", 6.6167, 79.9500),
    ("Walallawita", 6.5833, 80.0667),

    // Central Province - Kandy
    ("Kandy", 7.2906, 80.6337),
    ("Gampola", 7.1644, 80.5742),
    ("Nawalapitiya", 7.0553, 80.5328),
    ("Doluwa", 7.1833, 80.7833),
    ("Yatinuwara", 7.2500, 80.7500),
    ("Udunuwara", 7.3167, 80.6833),
    ("Ganga Ihala Korale", 7.2167, 80.5667),
    ("Hewaheta", 7.0833, 80.6333),
    ("Medadumbara", 7.3833, 80.7333),
    ("Pasbage Korale", 7.2000, 80.7000),
    ("Harispattuwa", 7.0500, 80.6000),
    ("Pathadumbara", 7.4000, 80.6500),
    ("Panwila", 7.3500, 80.6000),
    ("Udapalatha", 7.3000, 80.5500),
    ("Akurana", 7.3667, 80.5500),
    ("Poojapitiya", 7.1167, 80.4667),
    ("Tumpane", 7.2333, 80.4500),
    ("Udadumbara", 7.4167, 80.7000),
    ("Kundasale", 7.2833, 80.6167),
    ("Thumpane", 7.2500, 80.4667),

    // Central Province - Matale
    ("Matale", 7.4675, 80.6234),
    ("Dambulla", 7.8731, 80.6519),
    ("Naula", 7.4167, 80.7167),
    ("Pallepola", 7.3167, 80.5833),
    ("Ukuwela", 7.3833, 80.6333),
    ("Rattota", 7.4500, 80.5500),
    ("Yatawatta", 7.3500, 80.5167),
    ("Galewela", 7.7500, 80.5500),
    ("Sigiriya", 7.9569, 80.7603),
    ("Laggala-Pallegama", 7.8000, 80.8000),
    ("Ambanganga Korale", 7.6000, 80.6500),
    ("Korale Pataha", 7.5500, 80.6000),

    // Central Province - Nuwara Eliya
    ("Nuwara Eliya", 6.9497, 80.7891),
    ("Hatton", 6.8914, 80.5953),
    ("Kotmale", 7.0167, 80.6833),
    ("Hanguranketha", 7.1667, 80.7833),
    ("Walapane", 6.9333, 80.9333),
    ("Ambagamuwa", 6.8833, 80.7167),

    // Southern Province - Galle
    ("Galle", 6.0535, 80.2210),
    ("Ambalangoda", 6.2354, 80.0540),
    ("Elpitiya", 6.2919, 80.1651),
    ("Bentara-Elpitiya", 6.2500, 80.2000),
    ("Nagoda", 6.0833, 80.1833),
    ("Baddegama", 6.1833, 80.3000),
    ("Rathgama", 6.0667, 80.1333),
    ("Balapitiya", 6.2667, 80.0333),
    ("Karandeniya", 6.2167, 80.2833),
    ("Benthota", 6.4167, 79.9667),
    ("Hikkaduwa", 6.1378, 80.1031),
    ("Imaduwa", 6.1333, 80.3667),
    ("Wanduraba", 6.1167, 80.4167),
    ("Neluwa", 6.3333, 80.4333),
    ("Yakkalamulla", 6.0833, 80.0500),
    ("Gonapinuwala", 6.1500, 80.0167),
    ("Udugama", 6.4167, 80.3833),

    // Southern Province - Matara
    ("Matara", 5.9549, 80.5550),
    ("Weligama", 5.9750, 80.4297),
    ("Hakmana", 6.1167, 80.9167),
    ("Akuressa", 6.0500, 80.7833),
    ("Malimbada", 6.1833, 80.6833),
    ("Thihagoda", 5.9333, 80.6000),
    ("Dickwella", 5.9333, 80.3833),
    ("Devinuwara", 5.9333, 80.5833),
    ("Pitabeddara", 6.0167, 80.6833),
    ("Pasgoda", 6.0833, 80.6167),
    ("Kotapola", 6.1500, 80.8500),
    ("Kirinda-Puhulwella", 6.1000, 81.1833),
    ("Welipitiya", 6.0167, 80.8167),
    ("Athuraliya", 6.1333, 80.7500),
    ("Kamburupitiya", 6.0667, 80.5167),

    // Southern Province - Hambantota
    ("Hambantota", 6.1241, 81.1185),
    ("Tangalle", 6.0240, 80.7953),
    ("Tissamaharama", 6.2833, 81.2833),
    ("Ambalantota", 6.1167, 81.0333),
    ("Beliatta", 6.0500, 80.7167),
    ("Weeraketiya", 6.1833, 80.9500),
    ("Suriyawewa", 6.2833, 81.0500),
    ("Lunugamvehera", 6.3167, 81.1833),
    ("Kataragama", 6.4133, 81.3344),
    ("Okewela", 6.2000, 81.2167),
    ("Sooriyawewa", 6.2833, 81.0500),

    // Northern Province - Jaffna
    ("Jaffna", 9.6615, 80.0255),
    ("Nallur", 9.6667, 80.0167),
    ("Chavakachcheri", 9.6167, 80.1667),
    ("Point Pedro", 9.8167, 80.2333),
    ("Karainagar", 9.7500, 79.9500),
    ("Velanai", 9.7833, 79.8167),
    ("Sandilipay", 9.7167, 80.1000),
    ("Delft", 9.5167, 79.6833),
    ("Kayts", 9.6667, 79.8500),
    ("Vadamarachchi East", 9.7000, 80.2500),
    ("Vadamarachchi South West", 9.6333, 80.1333),
    ("Thenmarachchi", 9.5833, 80.1000),
    ("Valikamam North", 9.7500, 80.0833),
    ("Valikamam East", 9.7167, 80.1500),
    ("Valikamam West", 9.7000, 80.0000),
    ("Valikamam South", 9.6500, 80.0833),
    ("Valikamam South West", 9.6167, 80.0333),
    ("Islands North", 9.8000, 79.8000),
    ("Islands South", 9.5000, 79.7000),

    // Northern Province - Kilinochchi
    ("Kilinochchi", 9.3900, 80.4036),
    ("Pachchilaipalli", 9.3333, 80.5000),
    ("Poonakary", 9.4500, 80.5500),
    ("Kandavalai", 9.2833, 80.3167),

    // Northern Province - Mannar
    ("Mannar", 8.9814, 79.9072),
    ("Madhu", 8.9500, 79.8500),
    ("Nanaddan", 9.0167, 79.9833),
    ("Musali", 8.9833, 80.0167),
    ("Manthai West", 8.8167, 79.8667),

    // Northern Province - Vavuniya
    ("Vavuniya", 8.7514, 80.4971),
    ("Vavuniya South", 8.6833, 80.4667),
    ("Vengalacheddikulam", 8.8167, 80.5833),

    // Northern Province - Mullaitivu
    ("Mullaitivu", 9.2667, 80.8142),
    ("Manthai East", 8.8833, 80.8167),
    ("Thunukkai", 9.1833, 80.8833),
    ("Welioya", 8.5833, 80.8333),
    ("Oddusuddan", 9.0833, 80.7500),
    ("Puthukudiyiruppu", 9.2500, 80.7833),
    ("Maritimepattu", 9.3333, 80.9000),

    // Eastern Province - Batticaloa
    ("Batticaloa", 7.7102, 81.7088),
    ("Eravur Pattu", 7.7833, 81.6000),
    ("Eravur Town", 7.7833, 81.6167),
    ("Koralai Pattu North", 7.7167, 81.7833),
    ("Koralai Pattu", 7.6833, 81.7500),
    ("Manmunai North", 7.6833, 81.6833),
    ("Manmunai Pattu", 7.6500, 81.6167),
    ("Manmunai South and Eruvil Pattu", 7.6167, 81.5833),
    ("Manmunai South West", 7.5833, 81.5167),
    ("Manmunai West", 7.6167, 81.4833),
    ("Porativu Pattu", 7.9000, 81.8333),
    ("Kattankudy", 7.6833, 81.7333),

    // Eastern Province - Ampara
    ("Ampara", 7.2906, 81.6656),
    ("Kalmunai", 7.4167, 81.8167),
    ("Sainthamaruthu", 7.3667, 81.8333),
    ("Akkaraipattu", 7.2167, 81.8500),
    ("Alayadivembu", 7.2833, 81.7833),
    ("Addalachchenai", 7.4500, 81.7000),
    ("Chenkalady", 7.8000, 81.5833),
    ("Karaitivu", 7.7167, 81.6833),
    ("Kiran", 7.4833, 81.6167),
    ("Lahugala", 7.1333, 81.8167),
    ("Mahaoya", 7.3500, 81.5167),
    ("Navithanveli", 7.1833, 81.8833),
    ("Padiyathalawa", 7.4167, 81.4333),
    ("Pothuvil", 6.8833, 81.8333),
    ("Sammanthurai", 7.3667, 81.8167),
    ("Thirukkovil", 7.0333, 81.8833),
    ("Uhana", 7.3000, 81.3833),
    ("Damana", 7.1167, 81.6833),
    ("Dehiattakandiya", 7.8167, 80.9333),

    // Eastern Province - Trincomalee
    ("Trincomalee", 8.5874, 81.2152),
    ("Kinniya", 8.4833, 81.1833),
    ("Mutur", 8.4667, 81.2833),
    ("Kuchchaveli", 8.7000, 81.4167),
    ("Gomarankadawala", 8.1833, 80.9167),
    ("Kantale", 8.3167, 81.1000),
    ("Thambalagamuwa", 8.2167, 81.1167),
    ("Seruvila", 8.7833, 81.3167),
    ("Verugal", 8.6667, 81.5167),
    ("Padavi Sri Pura", 8.0833, 81.0167),
    ("Town and Gravets", 8.5833, 81.2000),
];

// ─── District → divisional secretariats ─────────────────────────

const DISTRICT_DIVISIONS: &[(&str, &[&str])] = &[
    // Western Province
    ("Colombo", &[
        "Colombo", "Dehiwala-Mount Lavinia", "Moratuwa", "Sri Jayawardenepura Kotte",
        "Thimbirigasyaya", "Kaduwela", "Kolonnawa", "Maharagama", "Kesbewa", "Homagama",
        "Padukka", "Hanwella", "Seethawaka", "Avissawella",
    ]),
    ("Gampaha", &[
        "Gampaha", "Negombo", "Katana", "Divulapitiya", "Mirigama", "Minuwangoda",
        "Attanagalla", "Ja-Ela", "Wattala", "Mahara", "Dompe", "Biyagama", "Kelaniya",
    ]),
    ("Kalutara", &[
        "Kalutara", "Beruwala", "Panadura", "Horana", "Ingiriya", "Bulathsinhala",
        "Mathugama", "Agalawatta", "Palindanuwara", "Madurawela", "Millaniya",
        "Bandaragama", "Dodangoda", "Walallawita",
    ]),

    // Central Province
    ("Kandy", &[
        "Kandy", "Gampola", "Nawalapitiya", "Doluwa", "Yatinuwara", "Udunuwara",
        "Ganga Ihala Korale", "Hewaheta", "Medadumbara", "Pasbage Korale", "Harispattuwa",
        "Pathadumbara", "Panwila", "Udapalatha", "Akurana", "Poojapitiya", "Thumpane",
        "Udadumbara", "Kundasale",
    ]),
    ("Matale", &[
        "Matale", "Dambulla", "Naula", "Pallepola", "Ukuwela", "Rattota", "Yatawatta",
        "Galewela", "Sigiriya", "Laggala-Pallegama", "Ambanganga Korale", "Korale Pataha",
    ]),
    ("Nuwara Eliya", &[
        "Nuwara Eliya", "Hatton", "Kotmale", "Hanguranketha", "Walapane", "Ambagamuwa",
    ]),

    // Southern Province
    ("Galle", &[
        "Galle", "Ambalangoda", "Elpitiya", "Bentara-Elpitiya", "Nagoda", "Baddegama",
        "Rathgama", "Balapitiya", "Karandeniya", "Benthota", "Hikkaduwa", "Imaduwa",
        "Wanduraba", "Neluwa", "Yakkalamulla", "Gonapinuwala", "Udugama",
    ]),
    ("Matara", &[
        "Matara", "Weligama", "Hakmana", "Akuressa", "Malimbada", "Thihagoda", "Dickwella",
        "Devinuwara", "Pitabeddara", "Pasgoda", "Kotapola", "Kirinda-Puhulwella",
        "Welipitiya", "Athuraliya", "Kamburupitiya",
    ]),
    ("Hambantota", &[
        "Hambantota", "Tangalle", "Tissamaharama", "Ambalantota", "Beliatta", "Weeraketiya",
        "Suriyawewa", "Lunugamvehera", "Kataragama", "Okewela",
    ]),

    // Northern Province
    ("Jaffna", &[
        "Jaffna", "Nallur", "Chavakachcheri", "Point Pedro", "Karainagar", "Velanai",
        "Sandilipay", "Delft", "Kayts", "Vadamarachchi East", "Vadamarachchi South West",
        "Thenmarachchi", "Valikamam North", "Valikamam East", "Valikamam West",
        "Valikamam South", "Valikamam South West", "Islands North", "Islands South",
    ]),
    ("Kilinochchi", &["Kilinochchi", "Pachchilaipalli", "Poonakary", "Kandavalai"]),
    ("Mannar", &["Mannar", "Madhu", "Nanaddan", "Musali", "Manthai West"]),
    ("Vavuniya", &["Vavuniya", "Vavuniya South", "Vavuniya North", "Vengalacheddikulam"]),
    ("Mullaitivu", &[
        "Mullaitivu", "Manthai East", "Thunukkai", "Welioya", "Oddusuddan",
        "Puthukudiyiruppu", "Maritimepattu",
    ]),

    // Eastern Province
    ("Batticaloa", &[
        "Batticaloa", "Eravur Pattu", "Eravur Town", "Koralai Pattu North", "Koralai Pattu",
        "Manmunai North", "Manmunai Pattu", "Manmunai South and Eruvil Pattu",
        "Manmunai South West", "Manmunai West", "Porativu Pattu", "Kattankudy",
    ]),
    ("Ampara", &[
        "Ampara", "Kalmunai", "Sainthamaruthu", "Akkaraipattu", "Alayadivembu",
        "Addalachchenai", "Chenkalady", "Karaitivu", "Kiran", "Lahugala", "Mahaoya",
        "Navithanveli", "Padiyathalawa", "Pothuvil", "Sammanthurai", "Thirukkovil", "Uhana",
        "Damana", "Dehiattakandiya",
    ]),
    ("Trincomalee", &[
        "Trincomalee", "Kinniya", "Mutur", "Kuchchaveli", "Gomarankadawala", "Kantale",
        "Thambalagamuwa", "Seruvila", "Verugal", "Padavi Sri Pura", "Town and Gravets",
    ]),

    // North Western Province
    ("Kurunegala", &[
        "Kurunegala", "Kuliyapitiya", "Alawwa", "Bingiriya", "Galgamuwa", "Giribawa",
        "Ibbagamuwa", "Maho", "Mawathagama", "Narammala", "Nikaweratiya", "Pannala",
        "Polgahawela", "Rideegama", "Wariyapola",
    ]),
    ("Puttalam", &[
        "Puttalam", "Chilaw", "Anamaduwa", "Arachchikattuwa", "Dankotuwa", "Kalpitiya",
        "Karuwalagaswewa", "Madampe", "Mahakumbukkadawala", "Mahawewa", "Mundalama",
        "Nattandiya", "Nawagattegama", "Pallama", "Vanathavilluwa", "Wennappuwa",
    ]),

    // North Central Province
    ("Anuradhapura", &[
        "Anuradhapura East", "Nuwaragam Palatha Central", "Kekirawa", "Galenbindunuwewa",
        "Galnewa", "Horowpothana", "Ipalogama", "Kahatagasdigiliya", "Kebithigollewa",
        "Mahawilachchiya", "Medawachchiya", "Mihintale", "Nachchaduwa", "Nochchiyagama",
        "Padaviya", "Palagala", "Palugaswewa", "Rajanganaya", "Rambewa", "Talawa",
        "Thambuttegama", "Thirappane",
    ]),
    ("Polonnaruwa", &[
        "Polonnaruwa", "Medirigiriya", "Dimbulagala", "Elahera", "Hingurakgoda",
        "Lankapura", "Thamankaduwa", "Welikanda",
    ]),

    // Uva Province
    ("Badulla", &[
        "Badulla", "Bandarawela", "Ella", "Haldummulla", "Haliela", "Haputale",
        "Kandaketiya", "Lunugala", "Mahiyanganaya", "Meegahakiula", "Passara",
        "Rideemaliyadda", "Soranathota", "Uva Paranagama", "Welimada",
    ]),
    ("Monaragala", &[
        "Monaragala", "Wellawaya", "Badalkumbura", "Bibile", "Buttala", "Madulla",
        "Medagama", "Sevanagala", "Siyambalanduwa", "Thanamalvila",
    ]),

    // Sabaragamuwa Province
    ("Ratnapura", &[
        "Ratnapura", "Balangoda", "Ayagama", "Eheliyagoda", "Elapatha", "Embilipitiya",
        "Godakawela", "Imbulpe", "Kahawatta", "Kalawana", "Kiriella", "Kolonna", "Kuruwita",
        "Nivithigala", "Opanayaka", "Pelmadulla", "Weligepola",
    ]),
    ("Kegalle", &[
        "Kegalle", "Mawanella", "Aranayaka", "Bulathkohupitiya", "Dehiovita", "Deraniyagala",
        "Galigamuwa", "Rambukkana", "Ruwanwella", "Warakapola", "Yatiyantota",
    ]),
];

// ─── Bounding-box zones ─────────────────────────────────────────

const fn zone(
    province: &'static str,
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
    district: &'static str,
    divisional_secretariat: &'static str,
) -> BoundingBoxZone {
    BoundingBoxZone {
        province,
        min_lat,
        max_lat,
        min_lng,
        max_lng,
        district,
        divisional_secretariat,
    }
}

/// Coarse lookup zones. Zones overlap; scan order is significant and the
/// first containing zone wins.
pub const ZONES: &[BoundingBoxZone] = &[
    zone("Western", 6.7, 7.0, 79.8, 80.2, "Colombo", "Colombo"),
    zone("Western", 6.85, 7.15, 79.85, 80.15, "Colombo", "Dehiwala-Mount Lavinia"),
    zone("Western", 6.9, 7.2, 79.9, 80.3, "Gampaha", "Gampaha"),
    zone("Western", 7.0, 7.3, 79.95, 80.25, "Gampaha", "Negombo"),
    zone("Western", 6.5, 6.8, 79.8, 80.2, "Kalutara", "Kalutara"),
    zone("Western", 6.45, 6.75, 79.95, 80.25, "Kalutara", "Beruwala"),

    zone("Central", 7.2, 7.4, 80.5, 80.8, "Kandy", "Kandy"),
    zone("Central", 7.25, 7.35, 80.55, 80.75, "Kandy", "Gampola"),
    zone("Central", 7.4, 7.6, 80.5, 80.8, "Matale", "Matale"),
    zone("Central", 7.45, 7.65, 80.6, 80.9, "Matale", "Dambulla"),
    zone("Central", 6.9, 7.1, 80.7, 81.0, "Nuwara Eliya", "Nuwara Eliya"),
    zone("Central", 6.95, 7.15, 80.75, 80.95, "Nuwara Eliya", "Hatton"),

    zone("Southern", 6.0, 6.3, 80.1, 80.4, "Galle", "Galle"),
    zone("Southern", 6.1, 6.2, 80.05, 80.15, "Galle", "Ambalangoda"),
    zone("Southern", 5.9, 6.2, 80.5, 80.8, "Matara", "Matara"),
    zone("Southern", 5.95, 6.05, 80.4, 80.5, "Matara", "Weligama"),
    zone("Southern", 6.1, 6.4, 81.0, 81.3, "Hambantota", "Hambantota"),
    zone("Southern", 6.2, 6.3, 81.0, 81.1, "Hambantota", "Tangalle"),

    zone("Northern", 9.5, 9.8, 80.0, 80.3, "Jaffna", "Jaffna"),
    zone("Northern", 9.8, 9.9, 80.2, 80.3, "Jaffna", "Point Pedro"),
    zone("Northern", 9.3, 9.6, 80.3, 80.6, "Kilinochchi", "Kilinochchi"),
    zone("Northern", 9.1, 9.4, 80.4, 80.7, "Kilinochchi", "Pachchilaipalli"),
    zone("Northern", 8.9, 9.2, 79.9, 80.2, "Mannar", "Mannar"),
    zone("Northern", 9.0, 9.1, 79.8, 79.9, "Mannar", "Madhu"),
    zone("Northern", 8.7, 9.0, 80.4, 80.7, "Vavuniya", "Vavuniya"),
    zone("Northern", 8.8, 9.1, 80.5, 80.8, "Vavuniya", "Vavuniya South"),
    zone("Northern", 9.0, 9.3, 80.7, 81.0, "Mullaitivu", "Mullaitivu"),
    zone("Northern", 9.2, 9.5, 80.8, 81.1, "Mullaitivu", "Puthukudiyiruppu"),

    zone("Eastern", 7.7, 8.0, 81.6, 81.9, "Batticaloa", "Batticaloa"),
    zone("Eastern", 7.6, 7.9, 81.65, 81.85, "Batticaloa", "Eravur Town"),
    zone("Eastern", 7.2, 7.5, 81.6, 81.9, "Ampara", "Ampara"),
    zone("Eastern", 7.1, 7.4, 81.7, 82.0, "Ampara", "Kalmunai"),
    zone("Eastern", 8.5, 8.8, 81.1, 81.4, "Trincomalee", "Trincomalee"),
    zone("Eastern", 8.4, 8.7, 81.2, 81.5, "Trincomalee", "Kinniya"),

    zone("North Western", 7.4, 7.7, 80.3, 80.6, "Kurunegala", "Kurunegala"),
    zone("North Western", 7.45, 7.55, 80.0, 80.3, "Kurunegala", "Kuliyapitiya"),
    zone("North Western", 8.0, 8.3, 79.8, 80.1, "Puttalam", "Puttalam"),
    zone("North Western", 7.5, 7.8, 79.8, 80.1, "Puttalam", "Chilaw"),

    zone("North Central", 8.3, 8.6, 80.3, 80.6, "Anuradhapura", "Anuradhapura East"),
    zone("North Central", 8.0, 8.3, 80.6, 80.9, "Anuradhapura", "Kekirawa"),
    zone("North Central", 7.9, 8.2, 80.9, 81.2, "Polonnaruwa", "Polonnaruwa"),
    zone("North Central", 8.1, 8.4, 81.0, 81.3, "Polonnaruwa", "Medirigiriya"),

    zone("Uva", 6.9, 7.2, 81.0, 81.3, "Badulla", "Badulla"),
    zone("Uva", 6.95, 7.05, 80.95, 81.05, "Badulla", "Bandarawela"),
    zone("Uva", 6.8, 7.1, 81.3, 81.6, "Monaragala", "Monaragala"),
    zone("Uva", 6.85, 7.05, 81.0, 81.3, "Monaragala", "Wellawaya"),

    zone("Sabaragamuwa", 6.6, 6.9, 80.3, 80.6, "Ratnapura", "Ratnapura"),
    zone("Sabaragamuwa", 6.6, 6.8, 80.6, 80.9, "Ratnapura", "Balangoda"),
    zone("Sabaragamuwa", 7.2, 7.5, 80.3, 80.6, "Kegalle", "Kegalle"),
    zone("Sabaragamuwa", 7.25, 7.35, 80.4, 80.5, "Kegalle", "Mawanella"),
];

// ─── Lookups ────────────────────────────────────────────────────

/// All district names in catalog order.
pub fn districts() -> impl Iterator<Item = &'static str> {
    DISTRICT_DIVISIONS.iter().map(|(name, _)| *name)
}

/// Representative coordinate of a district (exact, case-sensitive name).
pub fn district_coordinates(name: &str) -> Option<Coordinates> {
    DISTRICT_COORDINATES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, lat, lng)| Coordinates::new(*lat, *lng))
}

/// Representative coordinate of a divisional secretariat by flat name.
///
/// The reference data keys divisions by name alone, so a name shared by
/// two districts would resolve to whichever entry is declared first. Use
/// [`division`] when the owning district is known.
pub fn ds_coordinates(name: &str) -> Option<Coordinates> {
    DS_COORDINATES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, lat, lng)| Coordinates::new(*lat, *lng))
}

/// Every district that has a representative coordinate.
pub fn district_entries() -> impl Iterator<Item = District> {
    DISTRICT_COORDINATES.iter().map(|(name, lat, lng)| District {
        name: *name,
        coordinates: Coordinates::new(*lat, *lng),
    })
}

/// Divisional secretariats of a district in catalog order; empty when the
/// district is unknown.
pub fn divisions_of(district: &str) -> &'static [&'static str] {
    DISTRICT_DIVISIONS
        .iter()
        .find(|(d, _)| *d == district)
        .map(|(_, list)| *list)
        .unwrap_or(&[])
}

/// Look up a division by its `(district, name)` identity.
pub fn division(district: &str, name: &str) -> Option<DivisionalSecretariat> {
    let (owner, list) = DISTRICT_DIVISIONS.iter().find(|(d, _)| *d == district)?;
    let ds = list.iter().find(|n| **n == name)?;
    Some(DivisionalSecretariat {
        district: *owner,
        name: *ds,
        coordinates: ds_coordinates(ds),
    })
}

/// Flat-name reverse lookup of the owning district (first owner wins).
pub fn owning_district(ds: &str) -> Option<&'static str> {
    DISTRICT_DIVISIONS
        .iter()
        .find(|(_, list)| list.iter().any(|n| *n == ds))
        .map(|(d, _)| *d)
}

/// Every divisional secretariat that belongs to a district, in catalog order.
pub fn divisional_secretariats() -> impl Iterator<Item = DivisionalSecretariat> {
    DISTRICT_DIVISIONS.iter().flat_map(|(district, list)| {
        list.iter().map(move |name| DivisionalSecretariat {
            district: *district,
            name: *name,
            coordinates: ds_coordinates(name),
        })
    })
}

// ─── Audit ──────────────────────────────────────────────────────

/// Data-completeness report across the catalogs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogAudit {
    pub district_count: usize,
    pub ds_count: usize,
    pub ds_with_coordinates: usize,
    pub districts_missing_coordinates: Vec<String>,
    /// `(district, ds)` pairs that are selectable but have no coordinate.
    pub ds_missing_coordinates: Vec<(String, String)>,
    /// Coordinate entries whose name no district lists.
    pub orphan_ds_coordinates: Vec<String>,
    /// Zone tags that do not name a catalog `(district, ds)` pair.
    pub invalid_zone_tags: Vec<(String, String)>,
}

impl CatalogAudit {
    pub fn is_clean(&self) -> bool {
        self.districts_missing_coordinates.is_empty()
            && self.ds_missing_coordinates.is_empty()
            && self.orphan_ds_coordinates.is_empty()
            && self.invalid_zone_tags.is_empty()
    }
}

/// Cross-check the catalogs against each other.
pub fn audit() -> CatalogAudit {
    let mut report = CatalogAudit {
        district_count: DISTRICT_DIVISIONS.len(),
        ..Default::default()
    };

    for district in districts() {
        if district_coordinates(district).is_none() {
            report.districts_missing_coordinates.push(district.to_string());
        }
    }

    for ds in divisional_secretariats() {
        report.ds_count += 1;
        match ds.coordinates {
            Some(_) => report.ds_with_coordinates += 1,
            None => report
                .ds_missing_coordinates
                .push((ds.district.to_string(), ds.name.to_string())),
        }
    }

    for (name, _, _) in DS_COORDINATES {
        if owning_district(name).is_none() {
            report.orphan_ds_coordinates.push(name.to_string());
        }
    }

    for z in ZONES {
        if division(z.district, z.divisional_secretariat).is_none() {
            report
                .invalid_zone_tags
                .push((z.district.to_string(), z.divisional_secretariat.to_string()));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_district_has_coordinates() {
        for d in districts() {
            assert!(district_coordinates(d).is_some(), "{d} has no coordinate");
        }
        assert_eq!(districts().count(), 25);
    }

    #[test]
    fn test_division_lists_are_duplicate_free() {
        for d in districts() {
            let list = divisions_of(d);
            assert!(!list.is_empty(), "{d} has no divisions");
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len(), "{d} lists a division twice");
        }
    }

    #[test]
    fn test_each_division_has_exactly_one_owner() {
        let mut seen = HashSet::new();
        for ds in divisional_secretariats() {
            assert!(seen.insert(ds.name), "{} is listed under two districts", ds.name);
        }
    }

    #[test]
    fn test_zone_tags_are_catalog_members() {
        for z in ZONES {
            assert!(
                division(z.district, z.divisional_secretariat).is_some(),
                "zone tag {}/{} not in catalog",
                z.district,
                z.divisional_secretariat
            );
        }
    }

    #[test]
    fn test_colombo_divisions() {
        let list = divisions_of("Colombo");
        for name in ["Colombo", "Kaduwela", "Homagama"] {
            assert!(list.contains(&name));
        }
    }

    #[test]
    fn test_unknown_district_has_no_divisions() {
        assert!(divisions_of("Atlantis").is_empty());
        assert!(divisions_of("colombo").is_empty());
    }

    #[test]
    fn test_flat_and_scoped_lookup() {
        assert_eq!(ds_coordinates("Hikkaduwa"), Some(Coordinates::new(6.1378, 80.1031)));
        assert_eq!(owning_district("Hikkaduwa"), Some("Galle"));
        assert!(division("Galle", "Hikkaduwa").is_some());
        assert!(division("Matara", "Hikkaduwa").is_none());
    }

    #[test]
    fn test_audit_reports_known_gaps() {
        let report = audit();
        assert_eq!(report.district_count, 25);
        assert!(report.districts_missing_coordinates.is_empty());
        assert!(report.invalid_zone_tags.is_empty());
        assert!(report
            .orphan_ds_coordinates
            .iter()
            .any(|n| n == "Sooriyawewa"));
        assert!(report
            .ds_missing_coordinates
            .iter()
            .any(|(d, ds)| d == "Kurunegala" && ds == "Kuliyapitiya"));
        assert_eq!(
            report.ds_count,
            report.ds_with_coordinates + report.ds_missing_coordinates.len()
        );
        assert!(!report.is_clean());
    }
}
